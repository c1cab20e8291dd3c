use std::{
  collections::{HashMap, VecDeque},
  sync::{Mutex, mpsc},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_client::{
  ApiRequest, ClientError, Dispatcher, MemorySessionStore, PortfolioApi, RawResponse,
  SessionContext, Transport,
};
use folio_core::{
  Notification,
  notify::Level,
  session::{Session, User},
};

use crate::{
  app::{App, View},
  route::Route,
};

// ─── Routed transport ─────────────────────────────────────────────────────────

/// Answers by `"METHOD path"`. The last queued response for a route repeats.
#[derive(Default)]
struct RoutedTransport {
  routes: Mutex<HashMap<String, VecDeque<(u16, String)>>>,
  sent:   Mutex<Vec<String>>,
}

impl RoutedTransport {
  fn new() -> Self { Self::default() }

  fn on(self, route: &str, status: u16, body: &str) -> Self {
    self
      .routes
      .lock()
      .unwrap()
      .entry(route.to_owned())
      .or_default()
      .push_back((status, body.to_owned()));
    self
  }
}

impl Transport for RoutedTransport {
  async fn send<'a>(
    &'a self,
    request: &'a ApiRequest,
    _token: Option<&'a str>,
  ) -> Result<RawResponse, ClientError> {
    let key = format!("{} {}", request.method.as_str(), request.path);
    self.sent.lock().unwrap().push(key.clone());
    let mut routes = self.routes.lock().unwrap();
    let queue = routes
      .get_mut(&key)
      .ok_or_else(|| ClientError::Network(format!("no route for {key}")))?;
    let (status, body) = if queue.len() > 1 {
      queue.pop_front().unwrap()
    } else {
      queue.front().cloned().unwrap()
    };
    Ok(RawResponse::new(status, body))
  }

  async fn refresh(&self) -> Result<RawResponse, ClientError> {
    Ok(RawResponse::new(401, "{}"))
  }
}

fn app(transport: RoutedTransport, signed_in: bool) -> App<RoutedTransport> {
  let session = signed_in.then(|| Session {
    user:  Some(User { email: "owner@example.com".into(), ..Default::default() }),
    token: "t0".into(),
  });
  let context = SessionContext::hydrate(MemorySessionStore::new(session));
  let (tx, rx) = mpsc::channel();
  App::new(PortfolioApi::new(Dispatcher::new(transport, context, tx)), rx)
}

fn sent(app: &App<RoutedTransport>) -> Vec<String> {
  app.api().dispatcher().transport().sent.lock().unwrap().clone()
}

fn toasts(app: &mut App<RoutedTransport>) -> Vec<Notification> {
  app.tick();
  app.toasts.iter().map(|t| t.notification.clone()).collect()
}

fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

async fn type_text(app: &mut App<RoutedTransport>, text: &str) {
  for c in text.chars() {
    app.handle_key(key(KeyCode::Char(c))).await.unwrap();
  }
}

const PROJECTS: &str = r#"[
  {"id":"p1","title":"Folio","description":"Admin","category":"Tools","tags":["Rust"]},
  {"id":"p2","title":"Kiln","description":"Builds","category":"Tools","tags":["Nix"]}
]"#;

const PROFILE: &str = r#"{
  "name":"Ada","title":"Engineer","experience":"5+ years","resumeFile":"https://ada.dev/cv.pdf",
  "github":"https://github.com/ada","linkedin":"https://linkedin.com/in/ada",
  "twitter":"https://x.com/ada"
}"#;

const ABOUT: &str = r#"{
  "description":"Hello from Ada",
  "personalInfo":[{"label":"Email","value":"ada@example.com"}],
  "features":[{"icon":"tabler:code","title":"Code","description":"Writes it"}]
}"#;

// ─── Sign-in ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn signed_out_visit_returns_to_origin_after_login() {
  let transport = RoutedTransport::new()
    .on("POST auth/login", 200, r#"{"token":"t1","user":{"email":"owner@example.com"}}"#)
    .on("GET projects", 200, PROJECTS);
  let mut app = app(transport, false);

  app.navigate(Route::Projects).await.unwrap();
  assert_eq!(app.route, Route::Login);
  assert!(sent(&app).is_empty());

  type_text(&mut app, "owner@example.com").await;
  app.handle_key(key(KeyCode::Tab)).await.unwrap();
  type_text(&mut app, "hunter22").await;
  app.handle_key(ctrl('s')).await.unwrap();

  assert_eq!(app.route, Route::Projects);
  assert!(matches!(app.view, View::List { .. }));
  assert_eq!(app.user.as_ref().map(|u| u.email.as_str()), Some("owner@example.com"));
  let shown = toasts(&mut app);
  assert!(shown.iter().any(|n| n.message == "Logged in successfully!"));
}

#[tokio::test]
async fn signed_in_user_skips_login_screen() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, "[]")
    .on("GET skills_technologies", 200, "[]")
    .on("GET blog", 200, "[]");
  let mut app = app(transport, true);

  app.navigate(Route::Login).await.unwrap();
  assert_eq!(app.route, Route::Dashboard);
}

#[tokio::test]
async fn expired_session_during_load_sends_to_login_then_back() {
  let transport = RoutedTransport::new()
    .on("GET profile", 401, r#"{"message":"jwt expired"}"#)
    .on("GET profile", 200, PROFILE)
    .on("POST auth/login", 200, r#"{"token":"t1"}"#);
  let mut app = app(transport, true);

  app.navigate(Route::Profile).await.unwrap();
  assert_eq!(app.route, Route::Login);
  assert!(!app.api().session().is_authenticated().await);

  type_text(&mut app, "owner@example.com").await;
  app.handle_key(key(KeyCode::Tab)).await.unwrap();
  type_text(&mut app, "hunter22").await;
  app.handle_key(ctrl('s')).await.unwrap();

  assert_eq!(app.route, Route::Profile);
  assert!(matches!(app.view, View::Form { .. }));
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_counts_survive_a_failed_fetch() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, PROJECTS)
    .on(
      "GET skills_technologies",
      200,
      r#"{"data":[{"id":1,"name":"Rust","icon":"tabler:brand-rust","category":"Languages"}]}"#,
    )
    .on("GET blog", 500, r#"{"message":"boom"}"#);
  let mut app = app(transport, true);

  app.navigate(Route::Dashboard).await.unwrap();
  let View::Dashboard(stats) = &app.view else {
    panic!("expected dashboard");
  };
  assert_eq!(stats.projects, Some(2));
  assert_eq!(stats.skills, Some(1));
  assert_eq!(stats.blog_posts, None);
  assert_eq!(stats.recent_projects, vec!["Folio".to_owned(), "Kiln".to_owned()]);
  assert!(stats.recent_posts.is_empty());
  assert!(toasts(&mut app).is_empty());
}

#[tokio::test]
async fn dashboard_lists_the_two_latest_posts() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, "[]")
    .on("GET skills_technologies", 200, "[]")
    .on(
      "GET blog",
      200,
      r#"[
        {"id":"b3","title":"Async traits","slug":"async-traits","publishedDate":"2024-05-01T08:00:00.000Z"},
        {"id":"b2","title":"Terminal UIs","slug":"terminal-uis","publishedDate":"not a date"},
        {"id":"b1","title":"Hello","slug":"hello","publishedDate":"2023-01-15"}
      ]"#,
    );
  let mut app = app(transport, true);

  app.navigate(Route::Dashboard).await.unwrap();
  let View::Dashboard(stats) = &app.view else {
    panic!("expected dashboard");
  };
  assert_eq!(stats.blog_posts, Some(3));
  assert_eq!(
    stats.recent_posts,
    vec![
      ("Async traits".to_owned(), chrono::NaiveDate::from_ymd_opt(2024, 5, 1)),
      ("Terminal UIs".to_owned(), None),
    ]
  );
}

// ─── Lists ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_waits_for_confirmation() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, PROJECTS)
    .on("DELETE projects/p1", 204, "");
  let mut app = app(transport, true);
  app.navigate(Route::Projects).await.unwrap();

  app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
  assert!(app.confirm_delete.is_some());
  app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
  assert!(app.confirm_delete.is_none());
  assert!(!sent(&app).iter().any(|s| s.starts_with("DELETE")));

  app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
  app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
  let requests = sent(&app);
  assert!(requests.contains(&"DELETE projects/p1".to_owned()));
  assert_eq!(requests.last().map(String::as_str), Some("GET projects"));
  let shown = toasts(&mut app);
  assert_eq!(shown.len(), 1);
  assert_eq!(shown[0].message, "Project deleted successfully!");
  assert_eq!(shown[0].level, Level::Success);
}

#[tokio::test]
async fn forbidden_delete_is_reported_once() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, PROJECTS)
    .on("DELETE projects/p1", 403, r#"{"message":"Not allowed"}"#);
  let mut app = app(transport, true);
  app.navigate(Route::Projects).await.unwrap();

  app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
  app.handle_key(key(KeyCode::Enter)).await.unwrap();

  let shown = toasts(&mut app);
  assert_eq!(shown.len(), 1);
  assert_eq!(shown[0].level, Level::Error);
  assert_eq!(shown[0].message, "Not allowed");
  assert_eq!(app.route, Route::Projects);
}

#[tokio::test]
async fn missing_record_shows_failed_page() {
  let transport =
    RoutedTransport::new().on("GET projects/gone", 404, r#"{"message":"Project not found"}"#);
  let mut app = app(transport, true);

  app.navigate(Route::ProjectEdit("gone".into())).await.unwrap();
  assert!(matches!(app.view, View::Failed { .. }));
  let shown = toasts(&mut app);
  assert_eq!(shown.len(), 1);
  assert_eq!(shown[0].message, "Project not found");
}

// ─── Forms ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn saved_edit_returns_to_list() {
  let transport = RoutedTransport::new()
    .on(
      "GET skills_technologies/7",
      200,
      r#"{"id":7,"name":"Rust","icon":"tabler:brand-rust","category":"Languages"}"#,
    )
    .on("GET skills_categories", 200, r#"[{"id":1,"name":"Languages","icon":"tabler:code"}]"#)
    .on("PATCH skills_technologies/7", 200, "{}")
    .on("GET skills_technologies", 200, "[]");
  let mut app = app(transport, true);

  app.navigate(Route::SkillEdit(7u64.into())).await.unwrap();
  let View::Form { editor, .. } = &app.view else {
    panic!("expected form");
  };
  assert!(!editor.can_submit());

  type_text(&mut app, "acean").await;
  app.handle_key(ctrl('s')).await.unwrap();

  assert!(sent(&app).contains(&"PATCH skills_technologies/7".to_owned()));
  assert_eq!(app.route, Route::Skills);
  let shown = toasts(&mut app);
  assert!(shown.iter().any(|n| n.message == "Skill updated successfully!"));
}

#[tokio::test]
async fn failed_save_keeps_the_draft() {
  let transport = RoutedTransport::new()
    .on("GET about", 200, ABOUT)
    .on("PATCH about", 500, r#"{"message":"Database unavailable"}"#);
  let mut app = app(transport, true);
  app.navigate(Route::About).await.unwrap();

  type_text(&mut app, " there").await;
  app.handle_key(ctrl('s')).await.unwrap();

  assert_eq!(app.route, Route::About);
  let View::Form { editor, .. } = &app.view else {
    panic!("expected form");
  };
  assert!(editor.is_dirty());
  assert_eq!(editor.value("description"), "Hello from Ada there");
  let shown = toasts(&mut app);
  assert_eq!(shown.len(), 1);
  assert_eq!(shown[0].message, "Database unavailable");
}

#[tokio::test]
async fn logout_clears_session() {
  let transport = RoutedTransport::new()
    .on("GET projects", 200, "[]")
    .on("GET skills_technologies", 200, "[]")
    .on("GET blog", 200, "[]");
  let mut app = app(transport, true);
  app.navigate(Route::Dashboard).await.unwrap();

  app.handle_key(key(KeyCode::Char('L'))).await.unwrap();
  assert_eq!(app.route, Route::Login);
  assert!(app.user.is_none());
  assert!(!app.api().session().is_authenticated().await);
}
