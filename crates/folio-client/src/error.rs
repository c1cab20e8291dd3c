//! Failure values returned by the Resource Client.
//!
//! The backend's error bodies come in several shapes. They are inspected
//! exactly once, here, and turned into a [`ClientError`] variant; nothing
//! above this module looks at raw error JSON.

use folio_core::{
  FieldErrors, UserMessage,
  notify::UNKNOWN_ERROR_MESSAGE,
};
use serde_json::Value;
use thiserror::Error;

// ─── ClientError ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
  /// The request never produced a response (DNS, connect, timeout, TLS).
  #[error("network error: {0}")]
  Network(String),

  /// 400 / 422: the server rejected the payload.
  #[error("{message}")]
  Validation {
    status:  u16,
    message: String,
    fields:  FieldErrors,
  },

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Forbidden(String),

  /// 401 that the refresh cycle could not recover.
  #[error("{0}")]
  Unauthorized(String),

  /// 5xx and any other non-success status.
  #[error("server error {status}: {message}")]
  Server { status: u16, message: String },

  /// A success response whose body did not have the expected shape.
  #[error("unexpected response body: {0}")]
  Decode(String),

  /// The request could not be built (payload serialization, unreadable
  /// upload file).
  #[error("could not build request: {0}")]
  Encode(String),
}

impl ClientError {
  /// Classify a non-success response.
  pub fn from_response(status: u16, body: &[u8]) -> Self {
    let json: Option<Value> = serde_json::from_slice(body).ok();
    let message = json
      .as_ref()
      .and_then(server_message)
      .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned());

    match status {
      400 | 422 => ClientError::Validation {
        status,
        message,
        fields: json.as_ref().map(field_errors).unwrap_or_default(),
      },
      401 => ClientError::Unauthorized(message),
      403 => ClientError::Forbidden(message),
      404 => ClientError::NotFound(message),
      _ => ClientError::Server { status, message },
    }
  }

  /// HTTP status behind this failure, if there was a response.
  pub fn status(&self) -> Option<u16> {
    match self {
      ClientError::Validation { status, .. } | ClientError::Server { status, .. } => {
        Some(*status)
      }
      ClientError::Unauthorized(_) => Some(401),
      ClientError::Forbidden(_) => Some(403),
      ClientError::NotFound(_) => Some(404),
      ClientError::Network(_) | ClientError::Decode(_) | ClientError::Encode(_) => None,
    }
  }

  /// Whether the dispatcher already showed this failure to the user.
  pub fn is_reported(&self) -> bool {
    matches!(self, ClientError::Forbidden(_) | ClientError::NotFound(_))
  }
}

impl UserMessage for ClientError {
  fn user_message(&self) -> String {
    match self {
      ClientError::Validation { message, .. }
      | ClientError::Server { message, .. }
      | ClientError::NotFound(message)
      | ClientError::Forbidden(message)
      | ClientError::Unauthorized(message) => message.clone().user_message(),
      other => other.to_string(),
    }
  }

  fn already_reported(&self) -> bool { self.is_reported() }
}

impl From<reqwest::Error> for ClientError {
  fn from(e: reqwest::Error) -> Self { ClientError::Network(e.to_string()) }
}

// ─── Body inspection ──────────────────────────────────────────────────────────

/// Pull a human-readable message out of an error body.
///
/// Checked in order: the body itself is a string; `data` is a string;
/// `data.message` is a string; `message` is a string.
pub fn server_message(body: &Value) -> Option<String> {
  if let Value::String(s) = body {
    return Some(s.clone());
  }
  let data = body.get("data");
  if let Some(Value::String(s)) = data {
    return Some(s.clone());
  }
  if let Some(Value::String(s)) = data.and_then(|d| d.get("message")) {
    return Some(s.clone());
  }
  match body.get("message") {
    Some(Value::String(s)) => Some(s.clone()),
    _ => None,
  }
}

/// Field-scoped messages from an `errors` member, either
/// `{"field": "msg" | ["msg", ...]}` or `[{"path"|"field": ..., "message": ...}]`.
pub fn field_errors(body: &Value) -> FieldErrors {
  let mut out = FieldErrors::new();
  match body.get("errors") {
    Some(Value::Object(map)) => {
      for (field, v) in map {
        let message = match v {
          Value::String(s) => Some(s.clone()),
          Value::Array(items) => items.iter().find_map(|i| i.as_str().map(str::to_owned)),
          _ => None,
        };
        if let Some(m) = message {
          out.insert(field.clone(), m);
        }
      }
    }
    Some(Value::Array(items)) => {
      for item in items {
        let field = item
          .get("path")
          .or_else(|| item.get("field"))
          .and_then(path_string);
        let message = item.get("message").and_then(Value::as_str);
        if let (Some(f), Some(m)) = (field, message) {
          out.insert(f, m);
        }
      }
    }
    _ => {}
  }
  out
}

/// `"a.b"` or `["a", 0, "b"]` → `"a.0.b"`.
fn path_string(v: &Value) -> Option<String> {
  match v {
    Value::String(s) => Some(s.clone()),
    Value::Array(parts) => Some(
      parts
        .iter()
        .map(|p| match p {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("."),
    ),
    _ => None,
  }
}

// ─── StoreError ───────────────────────────────────────────────────────────────

/// Failure reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("session file i/o: {0}")]
  Io(#[from] std::io::Error),

  #[error("session file is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),
}
