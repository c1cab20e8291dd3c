//! Schema-bound draft editing.
//!
//! A [`FormSession`] holds the defaults an edit started from, the live
//! draft, and the validation errors for that draft. Errors are recomputed on
//! every change, not only on submit.
//!
//! Fields are reached two ways: typed closures through [`FormSession::update`],
//! and dotted string paths such as `features.0.title` through
//! [`FormSession::field`] / [`FormSession::set_field`]. A path must already
//! exist in the draft; typos are errors rather than new keys.

use std::future::Future;

use folio_core::{
  FieldErrors, Notification, Notifier, Result, UserMessage, Validate, path::FieldPath,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Anything a form can edit.
pub trait Draft: Validate + Clone + PartialEq + Serialize + DeserializeOwned {}

impl<T> Draft for T where T: Validate + Clone + PartialEq + Serialize + DeserializeOwned {}

#[derive(Debug, Clone)]
pub struct FormSession<T> {
  defaults:  T,
  draft:     T,
  errors:    FieldErrors,
  in_flight: bool,
}

impl<T: Draft> FormSession<T> {
  pub fn new(defaults: T) -> Self {
    let errors = defaults.validate();
    Self { draft: defaults.clone(), defaults, errors, in_flight: false }
  }

  pub fn draft(&self) -> &T { &self.draft }

  pub fn defaults(&self) -> &T { &self.defaults }

  /// Every current validation error, whether or not the user has edited yet.
  pub fn errors(&self) -> &FieldErrors { &self.errors }

  /// The error to show next to `path`. Nothing is shown until the draft
  /// first differs from its defaults.
  pub fn error(&self, path: &str) -> Option<&str> {
    if self.is_dirty() { self.errors.get(path) } else { None }
  }

  pub fn is_dirty(&self) -> bool { self.draft != self.defaults }

  pub fn is_valid(&self) -> bool { self.errors.is_empty() }

  pub fn is_submitting(&self) -> bool { self.in_flight }

  /// False while a submission is in flight, while nothing has changed, or
  /// while the draft has validation errors.
  pub fn can_submit(&self) -> bool { !self.in_flight && self.is_dirty() && self.is_valid() }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn update(&mut self, edit: impl FnOnce(&mut T)) {
    edit(&mut self.draft);
    self.revalidate();
  }

  /// Read the value at a dotted path.
  pub fn field(&self, path: &str) -> Result<Value> {
    let path = FieldPath::parse(path)?;
    let json = serde_json::to_value(&self.draft)?;
    Ok(path.get(&json)?.clone())
  }

  /// Convenience for string fields. Non-string values (including `null`)
  /// read as empty.
  pub fn text(&self, path: &str) -> Result<String> {
    Ok(match self.field(path)? {
      Value::String(s) => s,
      _ => String::new(),
    })
  }

  /// Write the value at a dotted path. The path must exist and the value
  /// must fit the field's type; otherwise the draft is left untouched.
  pub fn set_field(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
    let path = FieldPath::parse(path)?;
    let value = value.into();
    self.edit_json(|json| path.set(json, value))
  }

  /// Run `edit` over the draft's JSON form and rebuild the draft from the
  /// result. If `edit` fails, or its result no longer deserializes as `T`,
  /// the draft is unchanged.
  pub fn edit_json<R>(&mut self, edit: impl FnOnce(&mut Value) -> Result<R>) -> Result<R> {
    let mut json = serde_json::to_value(&self.draft)?;
    let out = edit(&mut json)?;
    self.draft = serde_json::from_value(json)?;
    self.revalidate();
    Ok(out)
  }

  /// Replace both defaults and draft, e.g. after a refetch.
  pub fn reset(&mut self, defaults: T) {
    self.draft = defaults.clone();
    self.defaults = defaults;
    self.revalidate();
  }

  /// Throw away edits.
  pub fn revert(&mut self) {
    self.draft = self.defaults.clone();
    self.revalidate();
  }

  fn revalidate(&mut self) { self.errors = self.draft.validate(); }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Mark a submission as in flight and hand out the values to send.
  /// Returns `None` when [`can_submit`](Self::can_submit) is false.
  pub fn begin_submit(&mut self) -> Option<T> {
    if !self.can_submit() {
      return None;
    }
    self.in_flight = true;
    Some(self.draft.clone())
  }

  /// Settle a submission started with [`begin_submit`](Self::begin_submit).
  ///
  /// On success `submitted` becomes the new defaults and `success` (when
  /// non-empty) is shown. On failure exactly one error notification is
  /// shown, unless the failure was already reported further down. Failures
  /// are never returned to the caller.
  pub fn finish_submit<R, E: UserMessage>(
    &mut self,
    submitted: T,
    result: Result<R, E>,
    notifier: &impl Notifier,
    success: &str,
  ) -> Option<R> {
    self.in_flight = false;
    match result {
      Ok(out) => {
        self.defaults = submitted;
        self.revalidate();
        if !success.is_empty() {
          notifier.notify(Notification::success(success));
        }
        Some(out)
      }
      Err(e) => {
        let message = e.user_message();
        tracing::warn!("submit failed: {message}");
        if !e.already_reported() {
          notifier.notify(Notification::error(message));
        }
        None
      }
    }
  }

  /// [`begin_submit`](Self::begin_submit), run `handler`, then
  /// [`finish_submit`](Self::finish_submit).
  pub async fn submit<F, Fut, R, E>(
    &mut self,
    notifier: &impl Notifier,
    success: &str,
    handler: F,
  ) -> Option<R>
  where
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: UserMessage,
  {
    let values = self.begin_submit()?;
    let result = handler(values.clone()).await;
    self.finish_submit(values, result, notifier, success)
  }
}
