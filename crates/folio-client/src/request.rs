//! Request descriptors.
//!
//! An [`ApiRequest`] is plain data, so the dispatcher can send it a second
//! time after a token refresh. Multipart bodies hold their file bytes for the
//! same reason.

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Post,
  Patch,
  Delete,
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Post => "POST",
      Method::Patch => "PATCH",
      Method::Delete => "DELETE",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
  Text {
    name:  String,
    value: String,
  },
  File {
    name:      String,
    file_name: String,
    mime:      String,
    bytes:     Bytes,
  },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
  #[default]
  Empty,
  Json(Value),
  Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method:  Method,
  /// Relative to the API base, without a leading slash, e.g. `projects/7`.
  pub path:    String,
  pub body:    RequestBody,
  pub headers: Vec<(String, String)>,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      body: RequestBody::Empty,
      headers: Vec::new(),
    }
  }

  pub fn get(path: impl Into<String>) -> Self { Self::new(Method::Get, path) }

  pub fn post(path: impl Into<String>) -> Self { Self::new(Method::Post, path) }

  pub fn patch(path: impl Into<String>) -> Self { Self::new(Method::Patch, path) }

  pub fn delete(path: impl Into<String>) -> Self { Self::new(Method::Delete, path) }

  pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
    let value = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
    self.body = RequestBody::Json(value);
    Ok(self)
  }

  pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
    self.body = RequestBody::Multipart(parts);
    self
  }

  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }
}

// ─── Multipart helpers ────────────────────────────────────────────────────────

/// Turn the top-level members of a JSON object into text parts. Strings are
/// sent as-is, `null` is skipped, and everything else is sent as JSON text.
pub fn text_parts(fields: &Value) -> Vec<FormPart> {
  let Value::Object(map) = fields else {
    return Vec::new();
  };
  map
    .iter()
    .filter(|(_, v)| !v.is_null())
    .map(|(name, v)| FormPart::Text {
      name:  name.clone(),
      value: match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      },
    })
    .collect()
}

/// Read `path` into a file part named `field`.
pub async fn file_part(field: &str, path: &Path) -> Result<FormPart, ClientError> {
  let bytes = tokio::fs::read(path)
    .await
    .map_err(|e| ClientError::Encode(format!("reading {}: {e}", path.display())))?;
  let file_name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| field.to_owned());
  Ok(FormPart::File {
    name: field.to_owned(),
    mime: mime_for(path).to_owned(),
    file_name,
    bytes: Bytes::from(bytes),
  })
}

fn mime_for(path: &Path) -> &'static str {
  let ext = path
    .extension()
    .map(|e| e.to_string_lossy().to_ascii_lowercase())
    .unwrap_or_default();
  match ext.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "svg" => "image/svg+xml",
    "pdf" => "application/pdf",
    _ => "application/octet-stream",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn text_parts_flatten_top_level_fields() {
    let parts = text_parts(&json!({
      "title": "Folio",
      "tags": ["Rust", "TUI"],
      "isFeatured": true,
      "demoUrl": null
    }));
    assert_eq!(parts.len(), 3);
    assert!(parts.contains(&FormPart::Text { name: "title".into(), value: "Folio".into() }));
    assert!(parts.contains(&FormPart::Text {
      name:  "tags".into(),
      value: r#"["Rust","TUI"]"#.into(),
    }));
    assert!(parts.contains(&FormPart::Text { name: "isFeatured".into(), value: "true".into() }));
  }

  #[test]
  fn mime_from_extension() {
    assert_eq!(mime_for(Path::new("a/b/shot.PNG")), "image/png");
    assert_eq!(mime_for(Path::new("cv.pdf")), "application/pdf");
    assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
  }

  #[tokio::test]
  async fn missing_upload_file_is_an_encode_error() {
    let err = file_part("image", Path::new("/definitely/not/here.png")).await.unwrap_err();
    assert!(matches!(err, ClientError::Encode(_)));
  }
}
