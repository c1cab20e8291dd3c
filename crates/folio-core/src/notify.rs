//! Transient user-visible notifications ("toasts").
//!
//! The request layer and the form layer both report failures through a
//! [`Notifier`]. The terminal UI drains them from a channel; tests collect
//! them the same way.

use std::{
  sync::{Arc, mpsc},
  time::Duration,
};

/// Shown when a failure carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

const DEFAULT_DURATION: Duration = Duration::from_secs(4);
const ERROR_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Success,
  Info,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub level:    Level,
  pub message:  String,
  /// How long the notification stays on screen.
  pub duration: Duration,
}

impl Notification {
  pub fn success(message: impl Into<String>) -> Self {
    Self { level: Level::Success, message: message.into(), duration: DEFAULT_DURATION }
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self { level: Level::Info, message: message.into(), duration: DEFAULT_DURATION }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { level: Level::Error, message: message.into(), duration: ERROR_DURATION }
  }
}

// ─── Sink ────────────────────────────────────────────────────────────────────

pub trait Notifier: Send + Sync {
  fn notify(&self, notification: Notification);
}

impl Notifier for mpsc::Sender<Notification> {
  fn notify(&self, notification: Notification) {
    // A closed receiver means the UI is shutting down.
    self.send(notification).ok();
  }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
  fn notify(&self, notification: Notification) { (**self).notify(notification) }
}

impl<N: Notifier + ?Sized> Notifier for &N {
  fn notify(&self, notification: Notification) { (**self).notify(notification) }
}

/// Discards everything. Used where no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
  fn notify(&self, _: Notification) {}
}

// ─── Failure text ────────────────────────────────────────────────────────────

/// The one line of text a failure shows to the user.
pub trait UserMessage {
  fn user_message(&self) -> String;

  /// True when the layer that produced the failure has already shown it, so
  /// the caller must not show it a second time.
  fn already_reported(&self) -> bool { false }
}

impl UserMessage for String {
  fn user_message(&self) -> String {
    if self.is_empty() { UNKNOWN_ERROR_MESSAGE.to_owned() } else { self.clone() }
  }
}

impl UserMessage for &str {
  fn user_message(&self) -> String { (*self).to_owned().user_message() }
}
