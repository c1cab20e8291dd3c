//! Application state machine and event dispatcher.

use std::{
  sync::{Arc, mpsc},
  time::Instant,
};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_client::{ClientError, HttpTransport, PortfolioApi, Transport};
use folio_core::{Notification, Notifier, ResourceId, UserMessage, session::User};
use folio_forms::DataTable;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::IntoEnumIterator;

use crate::{
  editor::{Editor, EditorAction},
  pages::{self, ListKind, ListRow, Submission},
  route::{EducationItemKind, Guard, Route, Section, guard},
};

pub type Api<T> = PortfolioApi<T, mpsc::Sender<Notification>>;

/// Number of project titles listed on the dashboard.
const RECENT_PROJECTS: usize = 3;
/// Number of blog posts listed on the dashboard.
const RECENT_POSTS: usize = 2;

// ─── View ─────────────────────────────────────────────────────────────────────

/// Counts shown on the dashboard. `None` when that fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
  pub projects:        Option<usize>,
  pub skills:          Option<usize>,
  pub blog_posts:      Option<usize>,
  pub recent_projects: Vec<String>,
  /// Title and publication day. The day is `None` when the stored date does
  /// not parse.
  pub recent_posts:    Vec<(String, Option<NaiveDate>)>,
}

pub enum View {
  Dashboard(DashboardStats),
  List {
    kind:  ListKind,
    table: DataTable<ListRow>,
  },
  Form {
    editor: Box<dyn Editor>,
    /// Where Esc and a successful create/edit lead.
    back:   Route,
  },
  /// A page whose data could not be loaded. `r` retries.
  Failed {
    title:   String,
    message: String,
  },
}

/// One-line input shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
  Filter(String),
  Goto(String),
}

#[derive(Debug, Clone)]
pub struct Toast {
  pub notification: Notification,
  pub shown_at:     Instant,
}

impl Toast {
  fn expired(&self, now: Instant) -> bool {
    now.duration_since(self.shown_at) >= self.notification.duration
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<T: Transport = HttpTransport> {
  pub route:          Route,
  pub view:           View,
  /// The signed-in owner, refreshed on every navigation.
  pub user:           Option<User>,
  pub toasts:         Vec<Toast>,
  pub prompt:         Option<Prompt>,
  /// Row awaiting a yes/no before it is deleted.
  pub confirm_delete: Option<ListRow>,
  pub status_msg:     String,
  login_from:         Option<Route>,
  viewport:           (u16, u16),
  api:                Arc<Api<T>>,
  notices:            mpsc::Receiver<Notification>,
}

impl<T: Transport> App<T> {
  /// `notices` is the receiving end of the API's notifier.
  pub fn new(api: Api<T>, notices: mpsc::Receiver<Notification>) -> Self {
    Self {
      route: Route::Dashboard,
      view: View::Dashboard(DashboardStats::default()),
      user: None,
      toasts: Vec::new(),
      prompt: None,
      confirm_delete: None,
      status_msg: String::new(),
      login_from: None,
      viewport: (80, 24),
      api: Arc::new(api),
      notices,
    }
  }

  #[cfg(test)]
  pub fn api(&self) -> &Api<T> { &self.api }

  fn notify(&self, notification: Notification) { self.api.notifier().notify(notification); }

  /// Move pending notifications on screen and drop expired ones.
  pub fn tick(&mut self) {
    let now = Instant::now();
    for notification in self.notices.try_iter() {
      self.toasts.push(Toast { notification, shown_at: now });
    }
    self.toasts.retain(|t| !t.expired(now));
  }

  pub fn resize(&mut self, width: u16, height: u16) {
    self.viewport = (width, height);
    if let View::Form { editor, .. } = &mut self.view {
      editor.resize(width, icon_rows(height));
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Go to `route`, applying the sign-in guard and loading its data.
  pub async fn navigate(&mut self, route: Route) -> Result<()> {
    let authenticated = self.api.session().is_authenticated().await;
    let route = match guard(route, authenticated) {
      Guard::Allow(Route::Login) if authenticated => Route::Dashboard,
      Guard::Allow(route) => route,
      Guard::Login { from } => {
        tracing::debug!(%from, "not signed in");
        self.login_from = Some(Route::parse(&from));
        Route::Login
      }
    };

    self.prompt = None;
    self.confirm_delete = None;
    self.status_msg = "Loading…".into();
    let view = self.load(&route).await?;
    self.status_msg.clear();

    // A 401 the refresh could not recover has signed us out.
    if route.is_protected() && !self.api.session().is_authenticated().await {
      self.login_from = Some(route);
      self.route = Route::Login;
      self.view = View::Form { editor: pages::login()?, back: Route::Login };
    } else {
      self.route = route;
      self.view = view;
    }
    self.user = self.api.session().user().await;
    let (width, height) = self.viewport;
    self.resize(width, height);
    Ok(())
  }

  pub async fn reload(&mut self) -> Result<()> { self.navigate(self.route.clone()).await }

  async fn load(&self, route: &Route) -> Result<View> {
    let api = &self.api;
    let back = route.parent();
    let form = |editor: Box<dyn Editor>| View::Form { editor, back: back.clone() };

    Ok(match route {
      Route::Dashboard => View::Dashboard(self.dashboard().await),
      Route::Login => View::Form { editor: pages::login()?, back: Route::Login },
      Route::Profile => match api.get_profile().await {
        Ok(p) => form(pages::profile(p)?),
        Err(e) => failed("Profile", "Failed to load profile information.", e),
      },
      Route::About => match api.get_about().await {
        Ok(a) => form(pages::about(a)?),
        Err(e) => failed("About Me", "Failed to load about me information.", e),
      },
      Route::Education => match api.get_education().await {
        Ok(e) => form(pages::education(e)?),
        Err(e) => failed("Education", "Failed to load education information.", e),
      },
      Route::EducationAdd(kind) => form(pages::education_item(*kind)?),
      Route::Projects => match api.list_projects().await {
        Ok(records) => View::List { kind: ListKind::Projects, table: pages::project_table(records) },
        Err(e) => failed("Projects", "Failed to load projects.", e),
      },
      Route::ProjectAdd => form(pages::project(None, Default::default())?),
      Route::ProjectEdit(id) => match api.get_project(id).await {
        Ok(record) => form(pages::project(Some(id.clone()), record.value)?),
        Err(e) => failed("Edit Project", "Failed to load project.", e),
      },
      Route::Experience => match api.list_experience().await {
        Ok(records) => View::List { kind: ListKind::Experience, table: pages::experience_table(records) },
        Err(e) => failed("Experience", "Failed to load experience.", e),
      },
      Route::ExperienceAdd => form(pages::experience(None, Default::default())?),
      Route::ExperienceEdit(id) => match api.get_experience(id).await {
        Ok(job) => form(pages::experience(Some(id.clone()), job)?),
        Err(e) => failed("Edit Experience", "Failed to load experience.", e),
      },
      Route::Skills => match api.list_skills().await {
        Ok(records) => View::List { kind: ListKind::Skills, table: pages::skill_table(records) },
        Err(e) => failed("Skills", "Failed to load skills.", e),
      },
      Route::SkillAdd => form(pages::skill(None, Default::default(), self.category_names().await)?),
      Route::SkillEdit(id) => match api.get_skill(id).await {
        Ok(record) => form(pages::skill(Some(id.clone()), record.value, self.category_names().await)?),
        Err(e) => failed("Edit Skill", "Failed to load skill.", e),
      },
      Route::SkillCategoryAdd => form(pages::category()?),
    })
  }

  async fn dashboard(&self) -> DashboardStats {
    let (projects, skills, posts) = tokio::join!(
      self.api.list_projects(),
      self.api.list_skills(),
      self.api.list_blog_posts(),
    );
    let recent_projects = match &projects {
      Ok(records) => records.iter().take(RECENT_PROJECTS).map(|r| r.value.title.clone()).collect(),
      Err(_) => Vec::new(),
    };
    let recent_posts = match &posts {
      Ok(records) => records
        .iter()
        .take(RECENT_POSTS)
        .map(|r| (r.value.title.clone(), published_on(&r.value.published_date)))
        .collect(),
      Err(_) => Vec::new(),
    };
    DashboardStats {
      projects: projects.ok().map(|r| r.len()),
      skills: skills.ok().map(|r| r.len()),
      blog_posts: posts.ok().map(|r| r.len()),
      recent_projects,
      recent_posts,
    }
  }

  /// Names offered by the skill form's category field. Empty when the
  /// categories cannot be fetched.
  async fn category_names(&self) -> Vec<String> {
    match self.api.list_categories().await {
      Ok(records) => records.into_iter().map(|r| r.value.name).collect(),
      Err(e) => {
        tracing::warn!("loading skill categories: {e}");
        Vec::new()
      }
    }
  }

  async fn open_career_summary(&mut self) -> Result<()> {
    match self.api.get_career_summary().await {
      Ok(summary) => {
        self.view = View::Form { editor: pages::career_summary(summary)?, back: Route::Experience };
        let (width, height) = self.viewport;
        self.resize(width, height);
      }
      Err(e) => self.report(&e),
    }
    Ok(())
  }

  /// Show a failure the dispatcher has not already shown.
  fn report(&self, e: &ClientError) {
    tracing::warn!("{e}");
    if !e.already_reported() {
      self.notify(Notification::error(e.user_message()));
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  async fn submit(&mut self) -> Result<()> {
    let api = Arc::clone(&self.api);
    let View::Form { editor, back } = &mut self.view else {
      return Ok(());
    };
    let Some(submission) = editor.begin_submit() else {
      return Ok(());
    };
    let is_login = matches!(submission, Submission::Login(_));
    let leaves = submission.leaves_page();
    let back = back.clone();

    let result = submission.send(&api).await;
    let signed_out = !is_login && matches!(result, Err(ClientError::Unauthorized(_)));
    let ok = editor.finish_submit(result, api.notifier());

    if signed_out {
      self.login_from = Some(self.route.clone());
      return self.navigate(Route::Login).await;
    }
    if !ok {
      return Ok(());
    }
    if is_login {
      let to = self.login_from.take().unwrap_or(Route::Dashboard);
      return self.navigate(to).await;
    }
    let to = if leaves { back } else { self.route.clone() };
    self.navigate(to).await
  }

  async fn delete(&mut self, row: ListRow) -> Result<()> {
    let View::List { kind, .. } = &self.view else {
      return Ok(());
    };
    let (result, noun) = match kind {
      ListKind::Projects => (self.api.delete_project(&row.id).await, "Project"),
      ListKind::Experience => (self.api.delete_experience(&row.id).await, "Experience"),
      ListKind::Skills => (self.api.delete_skill(&row.id).await, "Skill"),
    };
    match result {
      Ok(()) => {
        tracing::info!(id = %row.id, "{noun} deleted");
        self.notify(Notification::success(format!("{noun} deleted successfully!")));
        self.reload().await
      }
      Err(ClientError::Unauthorized(_)) => self.reload().await,
      Err(e) => {
        self.report(&e);
        Ok(())
      }
    }
  }

  pub async fn logout(&mut self) -> Result<()> {
    self.api.logout().await;
    self.login_from = None;
    self.notify(Notification::info("Signed out."));
    self.navigate(Route::Login).await
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if let Some(row) = self.confirm_delete.take() {
      if matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) {
        self.delete(row).await?;
      }
      return Ok(true);
    }

    if self.prompt.is_some() {
      return self.handle_prompt_key(key).await;
    }

    if ctrl && key.code == KeyCode::Char('g') {
      self.prompt = Some(Prompt::Goto(String::new()));
      return Ok(true);
    }

    if matches!(self.view, View::Form { .. }) {
      self.handle_form_key(key).await
    } else if matches!(self.view, View::List { .. }) {
      self.handle_list_key(key).await
    } else {
      self.handle_page_key(key).await
    }
  }

  pub fn handle_paste(&mut self, text: &str) -> Result<()> {
    match (&mut self.prompt, &mut self.view) {
      (Some(Prompt::Goto(input)), _) => input.push_str(text.trim()),
      (Some(Prompt::Filter(input)), View::List { table, .. }) => {
        input.push_str(text.trim());
        table.set_filter(input);
      }
      (None, View::Form { editor, .. }) => editor.handle_paste(text)?,
      _ => {}
    }
    Ok(())
  }

  async fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<bool> {
    let Some(prompt) = self.prompt.as_mut() else {
      return Ok(true);
    };
    let filtering = matches!(prompt, Prompt::Filter(_));
    let input = match prompt {
      Prompt::Filter(input) | Prompt::Goto(input) => input,
    };
    match key.code {
      KeyCode::Esc => {
        if filtering
          && let View::List { table, .. } = &mut self.view
        {
          table.set_filter("");
        }
        self.prompt = None;
        return Ok(true);
      }
      KeyCode::Enter => {
        let done = self.prompt.take();
        if let Some(Prompt::Goto(query)) = done
          && let Some(route) = goto_target(&query)
        {
          self.navigate(route).await?;
        }
        return Ok(true);
      }
      KeyCode::Backspace => {
        input.pop();
      }
      KeyCode::Char(c) => input.push(c),
      _ => return Ok(true),
    }
    if let (Some(Prompt::Filter(input)), View::List { table, .. }) = (&self.prompt, &mut self.view) {
      table.set_filter(input);
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> Result<bool> {
    if self.route == Route::Education {
      let kind = match key.code {
        KeyCode::F(2) => Some(EducationItemKind::Achievement),
        KeyCode::F(3) => Some(EducationItemKind::Subject),
        KeyCode::F(4) => Some(EducationItemKind::Course),
        _ => None,
      };
      if let Some(kind) = kind {
        self.navigate(Route::EducationAdd(kind)).await?;
        return Ok(true);
      }
    }

    let View::Form { editor, back } = &mut self.view else {
      return Ok(true);
    };
    match editor.handle_key(key)? {
      EditorAction::Submit => self.submit().await?,
      EditorAction::Back if self.route == Route::Login => {}
      EditorAction::Back => {
        let back = back.clone();
        self.navigate(back).await?;
      }
      EditorAction::Reverted => {
        self.notify(Notification::info("Form has been reset to the original values."));
      }
      EditorAction::None => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> Result<bool> {
    let View::List { kind, table } = &mut self.view else {
      return Ok(true);
    };
    let kind = *kind;
    let selected = table.selected().map(|row| row.id.clone());

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc => self.navigate(Route::Dashboard).await?,

      KeyCode::Down | KeyCode::Char('j') => table.cursor_down(),
      KeyCode::Up | KeyCode::Char('k') => table.cursor_up(),
      KeyCode::Right | KeyCode::Char(']') | KeyCode::PageDown => {
        table.next_page();
      }
      KeyCode::Left | KeyCode::Char('[') | KeyCode::PageUp => {
        table.previous_page();
      }
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        table.toggle_sort(index);
      }
      KeyCode::Char('/') => {
        self.prompt = Some(Prompt::Filter(table.filter().to_owned()));
      }

      KeyCode::Char('a') => self.navigate(add_route(kind)).await?,
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(id) = selected {
          self.navigate(edit_route(kind, id)).await?;
        }
      }
      KeyCode::Char('d') => {
        self.confirm_delete = table.selected().cloned();
      }
      KeyCode::Char('r') => self.reload().await?,
      KeyCode::Char('s') if kind == ListKind::Experience => self.open_career_summary().await?,
      KeyCode::Char('c') if kind == ListKind::Skills => {
        self.navigate(Route::SkillCategoryAdd).await?;
      }
      KeyCode::Char('g') => self.prompt = Some(Prompt::Goto(String::new())),
      KeyCode::Char('L') => self.logout().await?,
      _ => {}
    }
    Ok(true)
  }

  /// Dashboard and failed pages.
  async fn handle_page_key(&mut self, key: KeyEvent) -> Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('r') => self.reload().await?,
      KeyCode::Esc => self.navigate(Route::Dashboard).await?,
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        if let Some(section) = Section::iter().nth(index) {
          self.navigate(section.route()).await?;
        }
      }
      KeyCode::Char('g') => self.prompt = Some(Prompt::Goto(String::new())),
      KeyCode::Char('L') => self.logout().await?,
      _ => {}
    }
    Ok(true)
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn failed(title: &str, message: &str, e: ClientError) -> View {
  tracing::warn!("loading {title}: {e}");
  View::Failed { title: title.to_owned(), message: message.to_owned() }
}

/// Grid rows available to the icon picker in a terminal `height` lines tall.
/// Day part of an ISO date or timestamp (`2024-05-01` or
/// `2024-05-01T08:00:00.000Z`).
fn published_on(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim().get(..10)?, "%Y-%m-%d").ok()
}

fn icon_rows(height: u16) -> usize { usize::from(height.saturating_sub(12)).max(1) }

fn add_route(kind: ListKind) -> Route {
  match kind {
    ListKind::Projects => Route::ProjectAdd,
    ListKind::Experience => Route::ExperienceAdd,
    ListKind::Skills => Route::SkillAdd,
  }
}

fn edit_route(kind: ListKind, id: ResourceId) -> Route {
  match kind {
    ListKind::Projects => Route::ProjectEdit(id),
    ListKind::Experience => Route::ExperienceEdit(id),
    ListKind::Skills => Route::SkillEdit(id),
  }
}

/// Resolve the goto prompt: a path when it starts with `/`, otherwise the
/// best fuzzy match among the sidebar sections.
pub fn goto_target(query: &str) -> Option<Route> {
  let query = query.trim();
  if query.is_empty() {
    return None;
  }
  if query.starts_with('/') {
    return Some(Route::parse(query));
  }
  let matcher = SkimMatcherV2::default();
  Section::iter()
    .filter_map(|s| matcher.fuzzy_match(&s.to_string(), query).map(|score| (score, s)))
    .max_by_key(|(score, _)| *score)
    .map(|(_, s)| s.route())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn goto_accepts_paths_and_section_names() {
    assert_eq!(goto_target("/skills/add"), Some(Route::SkillAdd));
    assert_eq!(goto_target("proj"), Some(Route::Projects));
    assert_eq!(goto_target("about"), Some(Route::About));
    assert_eq!(goto_target("   "), None);
    assert_eq!(goto_target("zzzz"), None);
  }

  #[test]
  fn icon_rows_never_zero() {
    assert_eq!(icon_rows(5), 1);
    assert_eq!(icon_rows(40), 28);
  }

  #[test]
  fn published_on_reads_dates_and_timestamps() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1);
    assert_eq!(published_on("2024-05-01"), day);
    assert_eq!(published_on("2024-05-01T08:00:00.000Z"), day);
    assert_eq!(published_on(""), None);
    assert_eq!(published_on("May 1st"), None);
  }
}
