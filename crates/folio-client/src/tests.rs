use std::{
  collections::VecDeque,
  sync::{Mutex, mpsc},
  time::Duration,
};

use folio_core::{
  Notification, ResourceId,
  notify::Level,
  session::{LoginForm, Session, User},
};

use crate::{
  ApiRequest, ClientError, Dispatcher, MemorySessionStore, PortfolioApi, RawResponse,
  SessionContext, Transport,
};

// ─── Scripted transport ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct Sent {
  path:  String,
  token: Option<String>,
}

/// Replays canned responses in order and records what was sent.
#[derive(Default)]
struct ScriptedTransport {
  responses: Mutex<VecDeque<RawResponse>>,
  refreshes: Mutex<VecDeque<Result<RawResponse, ClientError>>>,
  sent:      Mutex<Vec<Sent>>,
  refreshed: Mutex<usize>,
}

impl ScriptedTransport {
  fn new() -> Self { Self::default() }

  fn respond(self, status: u16, body: &str) -> Self {
    self
      .responses
      .lock()
      .unwrap()
      .push_back(RawResponse::new(status, body.to_owned()));
    self
  }

  fn refresh_with(self, result: Result<RawResponse, ClientError>) -> Self {
    self.refreshes.lock().unwrap().push_back(result);
    self
  }

  fn sent(&self) -> Vec<Sent> { self.sent.lock().unwrap().clone() }

  fn refresh_count(&self) -> usize { *self.refreshed.lock().unwrap() }
}

impl Transport for ScriptedTransport {
  async fn send<'a>(
    &'a self,
    request: &'a ApiRequest,
    token: Option<&'a str>,
  ) -> Result<RawResponse, ClientError> {
    self.sent.lock().unwrap().push(Sent {
      path:  request.path.clone(),
      token: token.map(str::to_owned),
    });
    self
      .responses
      .lock()
      .unwrap()
      .pop_front()
      .ok_or_else(|| ClientError::Network("script exhausted".into()))
  }

  async fn refresh(&self) -> Result<RawResponse, ClientError> {
    *self.refreshed.lock().unwrap() += 1;
    self
      .refreshes
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Ok(RawResponse::new(401, "{}")))
  }
}

struct Harness {
  dispatcher: Dispatcher<ScriptedTransport, mpsc::Sender<Notification>>,
  store:      MemorySessionStore,
  toasts:     mpsc::Receiver<Notification>,
}

fn signed_in(transport: ScriptedTransport, token: &str) -> Harness {
  let store = MemorySessionStore::new(Some(Session {
    user:  Some(User { email: "owner@example.com".into(), ..Default::default() }),
    token: token.into(),
  }));
  let session = SessionContext::hydrate(store.clone());
  let (tx, toasts) = mpsc::channel();
  Harness { dispatcher: Dispatcher::new(transport, session, tx), store, toasts }
}

fn drain(rx: &mpsc::Receiver<Notification>) -> Vec<Notification> { rx.try_iter().collect() }

// ─── Refresh cycle ────────────────────────────────────────────────────────────

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
  let transport = ScriptedTransport::new()
    .respond(401, r#"{"message":"jwt expired"}"#)
    .respond(200, r#"{"data":{"name":"Ada"}}"#)
    .refresh_with(Ok(RawResponse::new(200, r#"{"data":{"token":"fresh"}}"#)));
  let h = signed_in(transport, "stale");

  let resp = h.dispatcher.dispatch(&ApiRequest::get("profile")).await.unwrap();
  assert_eq!(resp.status, 200);

  let t = h.dispatcher_transport();
  assert_eq!(t.refresh_count(), 1);
  assert_eq!(t.sent(), vec![
    Sent { path: "profile".into(), token: Some("stale".into()) },
    Sent { path: "profile".into(), token: Some("fresh".into()) },
  ]);
  assert_eq!(h.dispatcher.session().token().await.as_deref(), Some("fresh"));
  assert_eq!(h.store.persisted().unwrap().token, "fresh");
  assert_eq!(
    h.store.persisted().unwrap().user.unwrap().email,
    "owner@example.com"
  );
  assert!(drain(&h.toasts).is_empty());
}

#[tokio::test]
async fn failed_refresh_clears_session_and_returns_original_failure() {
  let transport = ScriptedTransport::new()
    .respond(401, r#"{"message":"jwt expired"}"#)
    .refresh_with(Ok(RawResponse::new(401, r#"{"message":"no refresh cookie"}"#)));
  let h = signed_in(transport, "stale");

  let err = h.dispatcher.dispatch(&ApiRequest::get("projects")).await.unwrap_err();
  assert_eq!(err, ClientError::Unauthorized("jwt expired".into()));
  assert_eq!(h.dispatcher_transport().sent().len(), 1);
  assert!(!h.dispatcher.session().is_authenticated().await);
  assert!(h.store.persisted().is_none());
}

#[tokio::test]
async fn refresh_body_without_token_counts_as_failure() {
  let transport = ScriptedTransport::new()
    .respond(401, "{}")
    .refresh_with(Ok(RawResponse::new(200, r#"{"data":{}}"#)));
  let h = signed_in(transport, "stale");

  assert!(h.dispatcher.dispatch(&ApiRequest::get("blog")).await.is_err());
  assert!(!h.dispatcher.session().is_authenticated().await);
}

#[tokio::test]
async fn refresh_network_error_counts_as_failure() {
  let transport = ScriptedTransport::new()
    .respond(401, "{}")
    .refresh_with(Err(ClientError::Network("connection refused".into())));
  let h = signed_in(transport, "stale");

  let err = h.dispatcher.dispatch(&ApiRequest::get("about")).await.unwrap_err();
  assert!(matches!(err, ClientError::Unauthorized(_)));
  assert!(!h.dispatcher.session().is_authenticated().await);
}

#[tokio::test]
async fn second_401_after_retry_does_not_refresh_again() {
  let transport = ScriptedTransport::new()
    .respond(401, "{}")
    .respond(401, r#"{"message":"still no"}"#)
    .refresh_with(Ok(RawResponse::new(200, r#"{"data":{"token":"fresh"}}"#)))
    .refresh_with(Ok(RawResponse::new(200, r#"{"data":{"token":"fresher"}}"#)));
  let h = signed_in(transport, "stale");

  let err = h.dispatcher.dispatch(&ApiRequest::get("education")).await.unwrap_err();
  assert_eq!(err, ClientError::Unauthorized("still no".into()));
  assert_eq!(h.dispatcher_transport().refresh_count(), 1);
  assert_eq!(h.dispatcher_transport().sent().len(), 2);
}

#[tokio::test]
async fn success_never_touches_refresh() {
  let transport = ScriptedTransport::new().respond(200, "[]");
  let h = signed_in(transport, "good");

  h.dispatcher.dispatch(&ApiRequest::get("skills_categories")).await.unwrap();
  assert_eq!(h.dispatcher_transport().refresh_count(), 0);
}

// ─── Notifications ────────────────────────────────────────────────────────────

#[tokio::test]
async fn forbidden_is_reported_with_server_message() {
  let transport = ScriptedTransport::new().respond(403, r#"{"data":"Forbidden"}"#);
  let h = signed_in(transport, "tok");

  let err = h
    .dispatcher
    .dispatch(&ApiRequest::delete("projects/7"))
    .await
    .unwrap_err();
  assert!(matches!(err, ClientError::Forbidden(_)));

  let toasts = drain(&h.toasts);
  assert_eq!(toasts.len(), 1);
  assert_eq!(toasts[0].level, Level::Error);
  assert_eq!(toasts[0].message, "Forbidden");
  assert_eq!(toasts[0].duration, Duration::from_secs(2));
}

#[tokio::test]
async fn not_found_without_message_uses_fallback() {
  let transport = ScriptedTransport::new().respond(404, "<html>nope</html>");
  let h = signed_in(transport, "tok");

  h.dispatcher.dispatch(&ApiRequest::get("blog/9")).await.unwrap_err();
  let toasts = drain(&h.toasts);
  assert_eq!(toasts.len(), 1);
  assert_eq!(toasts[0].message, "An unknown error occurred");
}

#[tokio::test]
async fn other_failures_are_left_to_the_caller() {
  let transport = ScriptedTransport::new()
    .respond(500, r#"{"message":"boom"}"#)
    .respond(422, r#"{"message":"bad","errors":{"title":"Title is required"}}"#);
  let h = signed_in(transport, "tok");

  let server = h.dispatcher.dispatch(&ApiRequest::get("profile")).await.unwrap_err();
  assert_eq!(server, ClientError::Server { status: 500, message: "boom".into() });

  let invalid = h.dispatcher.dispatch(&ApiRequest::post("projects")).await.unwrap_err();
  let ClientError::Validation { fields, .. } = invalid else { panic!("expected validation") };
  assert_eq!(fields.get("title"), Some("Title is required"));

  assert!(drain(&h.toasts).is_empty());
}

// ─── Typed API ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_sends_no_token_and_starts_session() {
  let transport = ScriptedTransport::new().respond(
    200,
    r#"{"data":{"token":"new-token","user":{"email":"owner@example.com","name":"Owner","role":"admin"}}}"#,
  );
  let store = MemorySessionStore::new(None);
  let api = PortfolioApi::new(Dispatcher::new(
    transport,
    SessionContext::hydrate(store.clone()),
    folio_core::notify::Silent,
  ));

  let form = LoginForm { email: "owner@example.com".into(), password: "secret1".into() };
  let session = api.login(&form).await.unwrap();
  assert_eq!(session.token, "new-token");
  assert_eq!(session.user.unwrap().role, "admin");
  assert_eq!(store.persisted().unwrap().token, "new-token");
  assert!(api.session().is_authenticated().await);
}

#[tokio::test]
async fn rejected_login_does_not_refresh() {
  let transport = ScriptedTransport::new().respond(401, r#"{"message":"Invalid credentials"}"#);
  let api = PortfolioApi::new(Dispatcher::new(
    transport,
    SessionContext::hydrate(MemorySessionStore::new(None)),
    folio_core::notify::Silent,
  ));

  let form = LoginForm { email: "owner@example.com".into(), password: "wrong-pw".into() };
  let err = api.login(&form).await.unwrap_err();
  assert_eq!(err, ClientError::Unauthorized("Invalid credentials".into()));
  assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn list_decodes_enveloped_records_with_numeric_ids() {
  let transport = ScriptedTransport::new().respond(
    200,
    r#"{"data":[{"id":3,"name":"Rust","icon":"brand-rust","category":"Languages"}]}"#,
  );
  let h = signed_in(transport, "tok");
  let api = PortfolioApi::new(h.dispatcher);

  let skills = api.list_skills().await.unwrap();
  assert_eq!(skills.len(), 1);
  assert_eq!(skills[0].id, ResourceId::from(3u64));
  assert_eq!(skills[0].value.icon, "brand-rust");
}

#[tokio::test]
async fn delete_ignores_empty_body_and_uses_jobs_path() {
  let transport = ScriptedTransport::new().respond(204, "");
  let h = signed_in(transport, "tok");
  let api = PortfolioApi::new(h.dispatcher);

  api.delete_experience(&ResourceId::new("abc")).await.unwrap();
  let sent = api.dispatcher().transport().sent();
  assert_eq!(sent[0].path, "experience/jobs/abc");
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

impl Harness {
  fn dispatcher_transport(&self) -> &ScriptedTransport { self.dispatcher.transport() }
}
