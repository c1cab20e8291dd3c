//! Validation schemas for drafts.
//!
//! Each editable record implements [`Validate`] by running a [`Rules`]
//! builder over its fields. Errors are keyed by the same dotted paths that
//! [`FieldPath`](crate::path::FieldPath) resolves, so a form can show each
//! message next to the field that produced it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Per-field validation messages. Only the first message for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn get(&self, path: &str) -> Option<&str> {
    self.0.get(path).map(String::as_str)
  }

  /// Record `message` for `path` unless the field already has one.
  pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
    self.0.entry(path.into()).or_insert_with(|| message.into());
  }

  /// Merge `other` with every path prefixed by `prefix.`.
  pub fn nest(&mut self, prefix: &str, other: FieldErrors) {
    for (path, message) in other.0 {
      self.insert(format!("{prefix}.{path}"), message);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// True if `path` or any field nested below it has an error.
  pub fn touches(&self, path: &str) -> bool {
    self.0.keys().any(|k| {
      k == path || k.strip_prefix(path).is_some_and(|rest| rest.starts_with('.'))
    })
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A record with a client-side schema.
pub trait Validate {
  /// Check every field. An empty result means the record may be submitted.
  fn validate(&self) -> FieldErrors;

  fn is_valid(&self) -> bool { self.validate().is_empty() }
}

impl Validate for String {
  fn validate(&self) -> FieldErrors { FieldErrors::new() }
}

// ─── Rule builder ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Rules {
  errors: FieldErrors,
}

impl Rules {
  pub fn new() -> Self { Self::default() }

  /// At least one character.
  pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
    self.min_chars(field, value, 1, message)
  }

  pub fn min_chars(
    &mut self,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
  ) -> &mut Self {
    if value.chars().count() < min {
      self.errors.insert(field, message);
    }
    self
  }

  /// An absolute URL with a scheme and host.
  pub fn url(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
    if !is_url(value) {
      self.errors.insert(field, message);
    }
    self
  }

  /// Absent is fine; an empty string counts as absent.
  pub fn optional_url(
    &mut self,
    field: &str,
    value: Option<&str>,
    message: &str,
  ) -> &mut Self {
    match value {
      Some(v) if !v.is_empty() => self.url(field, v, message),
      _ => self,
    }
  }

  pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
    if !is_email(value) {
      self.errors.insert(field, message);
    }
    self
  }

  pub fn min_items<T>(
    &mut self,
    field: &str,
    items: &[T],
    min: usize,
    message: &str,
  ) -> &mut Self {
    if items.len() < min {
      self.errors.insert(field, message);
    }
    self
  }

  /// Validate each element of a sub-record array, nesting errors under
  /// `field.<index>`.
  pub fn each<T: Validate>(&mut self, field: &str, items: &[T]) -> &mut Self {
    for (i, item) in items.iter().enumerate() {
      self.errors.nest(&format!("{field}.{i}"), item.validate());
    }
    self
  }

  /// Require every string in an array to be non-empty.
  pub fn each_required(
    &mut self,
    field: &str,
    items: &[String],
    message: &str,
  ) -> &mut Self {
    for (i, item) in items.iter().enumerate() {
      if item.is_empty() {
        self.errors.insert(format!("{field}.{i}"), message);
      }
    }
    self
  }

  /// Record a rule the builder has no helper for.
  pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
    if !ok {
      self.errors.insert(field, message);
    }
    self
  }

  pub fn finish(&mut self) -> FieldErrors { std::mem::take(&mut self.errors) }
}

fn is_url(value: &str) -> bool {
  Url::parse(value).is_ok_and(|u| u.has_host())
}

fn is_email(value: &str) -> bool {
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && !value.chars().any(char::is_whitespace)
    && domain.split('.').count() >= 2
    && domain.split('.').all(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_message_per_field_wins() {
    let errors = Rules::new()
      .required("name", "", "Name is required")
      .min_chars("name", "", 3, "too short")
      .finish();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some("Name is required"));
  }

  #[test]
  fn url_rule() {
    let errors = Rules::new()
      .url("a", "https://github.com/someone", "bad")
      .url("b", "github.com/someone", "bad")
      .url("c", "", "bad")
      .finish();
    assert!(errors.get("a").is_none());
    assert_eq!(errors.get("b"), Some("bad"));
    assert_eq!(errors.get("c"), Some("bad"));
  }

  #[test]
  fn optional_url_treats_empty_as_absent() {
    let errors = Rules::new()
      .optional_url("demo", None, "bad")
      .optional_url("repo", Some(""), "bad")
      .optional_url("site", Some("nope"), "bad")
      .finish();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("site").is_some());
  }

  #[test]
  fn email_rule() {
    assert!(is_email("owner@example.com"));
    assert!(!is_email("owner@example"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("owner@@example.com"));
    assert!(!is_email("own er@example.com"));
  }

  #[test]
  fn nest_prefixes_paths_and_touches_matches_subtree() {
    let mut inner = FieldErrors::new();
    inner.insert("title", "Title is required");
    let mut outer = FieldErrors::new();
    outer.nest("features.1", inner);

    assert_eq!(outer.get("features.1.title"), Some("Title is required"));
    assert!(outer.touches("features"));
    assert!(outer.touches("features.1"));
    assert!(!outer.touches("feat"));
    assert!(!outer.touches("features.0"));
  }
}
