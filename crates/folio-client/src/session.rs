//! Session context: the bearer token and user identity shared by every
//! request.
//!
//! The context is created once at startup with [`SessionContext::hydrate`],
//! handed to the dispatcher, and torn down with [`SessionContext::clear`].
//! Every change is written through to a [`SessionStore`] so the next start
//! resumes where this one left off.

use std::{
  path::PathBuf,
  sync::{Arc, Mutex, PoisonError},
};

use folio_core::session::{Session, User};
use tokio::sync::RwLock;

use crate::StoreError;

// ─── Persistence ──────────────────────────────────────────────────────────────

pub trait SessionStore: Send + Sync {
  fn load(&self) -> Result<Option<Session>, StoreError>;
  fn save(&self, session: &Session) -> Result<(), StoreError>;
  fn remove(&self) -> Result<(), StoreError>;
}

/// JSON file on disk. A missing file means "signed out".
#[derive(Debug, Clone)]
pub struct FileSessionStore {
  path: PathBuf,
}

impl FileSessionStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl SessionStore for FileSessionStore {
  fn load(&self) -> Result<Option<Session>, StoreError> {
    match std::fs::read(&self.path) {
      Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn save(&self, session: &Session) -> Result<(), StoreError> {
    if let Some(dir) = self.path.parent() {
      std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
    Ok(())
  }

  fn remove(&self) -> Result<(), StoreError> {
    match std::fs::remove_file(&self.path) {
      Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
      _ => Ok(()),
    }
  }
}

/// Keeps the "persisted" copy in memory. For tests and `--no-persist` runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
  saved: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
  pub fn new(initial: Option<Session>) -> Self {
    Self { saved: Arc::new(Mutex::new(initial)) }
  }

  /// What a restart would hydrate from.
  pub fn persisted(&self) -> Option<Session> {
    self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

impl SessionStore for MemorySessionStore {
  fn load(&self) -> Result<Option<Session>, StoreError> { Ok(self.persisted()) }

  fn save(&self, session: &Session) -> Result<(), StoreError> {
    *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    Ok(())
  }

  fn remove(&self) -> Result<(), StoreError> {
    *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = None;
    Ok(())
  }
}

// ─── Context ──────────────────────────────────────────────────────────────────

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SessionContext {
  current: Arc<RwLock<Option<Session>>>,
  store:   Arc<dyn SessionStore>,
  /// Held across an update and its store write so writes land in order.
  writes:  Arc<tokio::sync::Mutex<()>>,
}

impl SessionContext {
  /// Load the persisted session, if any. A corrupt or unreadable store is
  /// logged and treated as signed out.
  pub fn hydrate(store: impl SessionStore + 'static) -> Self {
    let initial = store.load().unwrap_or_else(|e| {
      tracing::warn!("discarding persisted session: {e}");
      None
    });
    Self {
      current: Arc::new(RwLock::new(initial)),
      store:   Arc::new(store),
      writes:  Arc::default(),
    }
  }

  pub async fn current(&self) -> Option<Session> { self.current.read().await.clone() }

  pub async fn token(&self) -> Option<String> {
    self.current.read().await.as_ref().map(|s| s.token.clone())
  }

  pub async fn user(&self) -> Option<User> {
    self.current.read().await.as_ref().and_then(|s| s.user.clone())
  }

  pub async fn is_authenticated(&self) -> bool { self.current.read().await.is_some() }

  /// Start a session (login).
  pub async fn set(&self, session: Session) { self.update(|_| Some(session)).await }

  /// Swap in a refreshed token, keeping the user identity.
  pub async fn replace_token(&self, token: String) {
    self
      .update(|current| Some(Session { user: current.and_then(|s| s.user.clone()), token }))
      .await
  }

  /// End the session (logout) and remove the persisted copy.
  pub async fn clear(&self) { self.update(|_| None).await }

  /// Swap the in-memory session, then write it through to the store after
  /// the read-write lock is released.
  async fn update(&self, next: impl FnOnce(Option<&Session>) -> Option<Session>) {
    let _writing = self.writes.lock().await;
    let next = {
      let mut guard = self.current.write().await;
      let updated = next(guard.as_ref());
      *guard = updated.clone();
      updated
    };

    let store = Arc::clone(&self.store);
    let result = tokio::task::spawn_blocking(move || match &next {
      Some(s) => store.save(s),
      None => store.remove(),
    })
    .await;
    match result {
      Ok(Ok(())) => {}
      Ok(Err(e)) => tracing::warn!("could not persist session: {e}"),
      Err(e) => tracing::warn!("session persistence task failed: {e}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{sync::mpsc, time::Duration};

  use super::*;

  fn session(token: &str) -> Session {
    Session {
      user:  Some(User { email: "owner@example.com".into(), ..Default::default() }),
      token: token.into(),
    }
  }

  #[tokio::test]
  async fn hydrate_restores_persisted_session() {
    let store = MemorySessionStore::new(Some(session("abc")));
    let ctx = SessionContext::hydrate(store);
    assert_eq!(ctx.token().await.as_deref(), Some("abc"));
  }

  #[tokio::test]
  async fn replace_token_keeps_user_and_persists() {
    let store = MemorySessionStore::new(None);
    let ctx = SessionContext::hydrate(store.clone());
    ctx.set(session("old")).await;
    ctx.replace_token("new".into()).await;

    let current = ctx.current().await.unwrap();
    assert_eq!(current.token, "new");
    assert_eq!(current.user.unwrap().email, "owner@example.com");
    assert_eq!(store.persisted().unwrap().token, "new");
  }

  #[tokio::test]
  async fn clear_removes_persisted_copy() {
    let store = MemorySessionStore::new(Some(session("abc")));
    let ctx = SessionContext::hydrate(store.clone());
    ctx.clear().await;
    assert!(!ctx.is_authenticated().await);
    assert!(store.persisted().is_none());
  }

  /// Blocks inside `save` until released.
  struct GatedStore {
    entered: mpsc::SyncSender<()>,
    release: Mutex<mpsc::Receiver<()>>,
  }

  impl SessionStore for GatedStore {
    fn load(&self) -> Result<Option<Session>, StoreError> { Ok(None) }

    fn save(&self, _session: &Session) -> Result<(), StoreError> {
      self.entered.send(()).ok();
      self.release.lock().unwrap().recv().ok();
      Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> { Ok(()) }
  }

  #[tokio::test]
  async fn readers_are_not_held_up_by_a_slow_store() {
    let (entered_tx, entered_rx) = mpsc::sync_channel(1);
    let (release_tx, release_rx) = mpsc::channel();
    let ctx = SessionContext::hydrate(GatedStore {
      entered: entered_tx,
      release: Mutex::new(release_rx),
    });

    let writer = tokio::spawn({
      let ctx = ctx.clone();
      async move { ctx.set(session("new")).await }
    });
    tokio::task::spawn_blocking(move || entered_rx.recv()).await.unwrap().unwrap();

    let token = tokio::time::timeout(Duration::from_secs(1), ctx.token())
      .await
      .expect("reader waited on the store");
    assert_eq!(token.as_deref(), Some("new"));

    release_tx.send(()).unwrap();
    writer.await.unwrap();
  }

  #[tokio::test]
  async fn file_store_round_trip_and_missing_file() {
    let path = std::env::temp_dir()
      .join(format!("folio-session-{}", uuid::Uuid::new_v4()))
      .join("session.json");
    let store = FileSessionStore::new(&path);
    assert!(store.load().unwrap().is_none());

    store.save(&session("tok")).unwrap();
    assert_eq!(store.load().unwrap().unwrap().token, "tok");

    store.remove().unwrap();
    store.remove().unwrap();
    assert!(!path.exists());
  }

  #[test]
  fn corrupt_file_is_treated_as_signed_out() {
    let path = std::env::temp_dir().join(format!("folio-corrupt-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, b"{not json").unwrap();
    let store = FileSessionStore::new(&path);
    assert!(store.load().is_err());

    let rt = tokio::runtime::Runtime::new().unwrap();
    let ctx = SessionContext::hydrate(store);
    assert!(!rt.block_on(ctx.is_authenticated()));
    std::fs::remove_file(&path).ok();
  }
}
