//! The single dispatch path every API call goes through.
//!
//! On `401` the dispatcher runs one refresh cycle: call the refresh endpoint,
//! and if it yields a token, store it and send the original request once
//! more. If it yields nothing, the session is cleared and the original
//! failure is returned. There is never a second refresh for the same call.
//!
//! Concurrent calls that each see a `401` each run their own refresh; there
//! is no coalescing.

use folio_core::{Notification, Notifier, UserMessage};
use serde_json::Value;

use crate::{
  ClientError,
  request::ApiRequest,
  session::SessionContext,
  transport::{RawResponse, Transport},
};

pub struct Dispatcher<T, N> {
  transport: T,
  session:   SessionContext,
  notifier:  N,
}

impl<T: Transport, N: Notifier> Dispatcher<T, N> {
  pub fn new(transport: T, session: SessionContext, notifier: N) -> Self {
    Self { transport, session, notifier }
  }

  pub fn transport(&self) -> &T { &self.transport }

  pub fn session(&self) -> &SessionContext { &self.session }

  pub fn notifier(&self) -> &N { &self.notifier }

  /// Send an authenticated request, recovering from one `401`.
  pub async fn dispatch(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
    let token = self.session.token().await;
    let first = self.transport.send(request, token.as_deref()).await?;

    let response = if first.status == 401 {
      match self.refresh().await {
        Some(fresh) => {
          self.session.replace_token(fresh.clone()).await;
          tracing::debug!(path = %request.path, "retrying with refreshed token");
          self.transport.send(request, Some(&fresh)).await?
        }
        None => {
          tracing::info!("refresh failed, signing out");
          self.session.clear().await;
          first
        }
      }
    } else {
      first
    };

    self.finish(request, response)
  }

  /// Send without a bearer token and without the refresh cycle (login).
  pub async fn dispatch_public(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
    let response = self.transport.send(request, None).await?;
    self.finish(request, response)
  }

  fn finish(&self, request: &ApiRequest, response: RawResponse) -> Result<RawResponse, ClientError> {
    if response.is_success() {
      return Ok(response);
    }
    let error = ClientError::from_response(response.status, &response.body);
    tracing::warn!(
      method = request.method.as_str(),
      path = %request.path,
      status = response.status,
      "request failed: {error}"
    );
    if error.is_reported() {
      self.notifier.notify(Notification::error(error.user_message()));
    }
    Err(error)
  }

  /// One refresh attempt. Returns the new token, or `None` for any failure:
  /// transport error, unreadable body, or a body without `data.token`.
  async fn refresh(&self) -> Option<String> {
    tracing::info!("sending refresh token");
    let response = match self.transport.refresh().await {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!("refresh call failed: {e}");
        return None;
      }
    };
    let body: Value = serde_json::from_slice(&response.body).ok()?;
    body
      .get("data")
      .and_then(|d| d.get("token"))
      .and_then(Value::as_str)
      .filter(|t| !t.is_empty())
      .map(str::to_owned)
  }
}
