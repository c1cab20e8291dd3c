//! The HTTP seam.
//!
//! [`Transport`] is the only place bytes leave the process. The dispatcher
//! is generic over it so the refresh cycle can be exercised against a
//! scripted transport in tests, and against [`HttpTransport`] in production.

use std::{future::Future, time::Duration};

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;

use crate::{
  ClientError,
  request::{ApiRequest, FormPart, Method, RequestBody},
};

/// Fixed endpoint for the refresh call, relative to the API base.
pub const REFRESH_PATH: &str = "auth/refresh-token";

// ─── Response ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
  pub status: u16,
  pub body:   Bytes,
}

impl RawResponse {
  pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
    Self { status, body: body.into() }
  }

  pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

  pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
    serde_json::from_slice(&self.body).map_err(|e| ClientError::Decode(e.to_string()))
  }
}

// ─── Trait ────────────────────────────────────────────────────────────────────

pub trait Transport: Send + Sync {
  /// Send `request`, adding `Authorization: Bearer <token>` when a token is
  /// given. Any HTTP status is a successful send; only transport failures
  /// are errors.
  fn send<'a>(
    &'a self,
    request: &'a ApiRequest,
    token: Option<&'a str>,
  ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send + 'a;

  /// `POST` the refresh endpoint with no body and no bearer header. The
  /// refresh credential travels in a cookie.
  fn refresh(&self) -> impl Future<Output = Result<RawResponse, ClientError>> + Send + '_;
}

// ─── reqwest implementation ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// API base, e.g. `http://localhost:5000/api`.
  pub base_url: String,
  pub timeout:  Duration,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), timeout: Duration::from_secs(30) }
  }
}

/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based and shares
/// one cookie jar across clones.
#[derive(Clone)]
pub struct HttpTransport {
  client: Client,
  config: ClientConfig,
}

impl HttpTransport {
  pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .cookie_store(true)
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.config.base_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }

  fn builder(&self, method: Method, path: &str) -> RequestBuilder {
    let url = self.url(path);
    match method {
      Method::Get => self.client.get(url),
      Method::Post => self.client.post(url),
      Method::Patch => self.client.patch(url),
      Method::Delete => self.client.delete(url),
    }
  }

  async fn execute(&self, req: RequestBuilder) -> Result<RawResponse, ClientError> {
    let resp = req.send().await?;
    let status = resp.status().as_u16();
    let body = resp.bytes().await?;
    Ok(RawResponse { status, body })
  }
}

impl Transport for HttpTransport {
  async fn send<'a>(
    &'a self,
    request: &'a ApiRequest,
    token: Option<&'a str>,
  ) -> Result<RawResponse, ClientError> {
    let mut req = self.builder(request.method, &request.path);
    if let Some(t) = token {
      req = req.bearer_auth(t);
    }
    for (name, value) in &request.headers {
      req = req.header(name.as_str(), value.as_str());
    }
    req = match &request.body {
      RequestBody::Empty => req,
      RequestBody::Json(v) => req.json(v),
      RequestBody::Multipart(parts) => req.multipart(build_form(parts)?),
    };

    tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
    self.execute(req).await
  }

  async fn refresh(&self) -> Result<RawResponse, ClientError> {
    self.execute(self.builder(Method::Post, REFRESH_PATH)).await
  }
}

/// Rebuilt for every send: a `multipart::Form` is consumed by the request.
fn build_form(parts: &[FormPart]) -> Result<multipart::Form, ClientError> {
  let mut form = multipart::Form::new();
  for part in parts {
    form = match part {
      FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
      FormPart::File { name, file_name, mime, bytes } => {
        let p = multipart::Part::stream(bytes.clone())
          .file_name(file_name.clone())
          .mime_str(mime)?;
        form.part(name.clone(), p)
      }
    };
  }
  Ok(form)
}
