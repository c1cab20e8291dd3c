//! Tag entry over a string-array field.
//!
//! Tags are trimmed, non-empty, unique (case-sensitive) and optionally
//! capped at a maximum count. Text typed or pasted as a list
//! (`React, TypeScript; Redux`) is split into several tags at once.

use folio_core::{Result, path::FieldPath};
use serde_json::Value;

use crate::form::{Draft, FormSession};

const SEPARATORS: [char; 4] = [',', ';', '\n', '\t'];
const QUOTES: [char; 3] = ['"', '\'', '`'];
const LIST_MARKERS: [char; 3] = ['-', '•', '*'];

/// Keys the tag input reacts to. Everything else is plain typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
  Enter,
  Comma,
  Backspace,
  Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
  /// One or more tags were added.
  Added(usize),
  /// The last tag was removed.
  Removed,
  /// Only the pending text changed.
  Edited,
  /// A tag was offered but rejected (blank, duplicate or over the cap).
  Rejected,
  Ignored,
}

#[derive(Debug, Clone)]
pub struct TagInput {
  path:    FieldPath,
  max:     Option<usize>,
  pending: String,
}

impl TagInput {
  pub fn new(path: &str, max: Option<usize>) -> Result<Self> {
    Ok(Self { path: FieldPath::parse(path)?, max, pending: String::new() })
  }

  pub fn path(&self) -> &FieldPath { &self.path }

  /// Text typed but not yet turned into a tag.
  pub fn pending(&self) -> &str { &self.pending }

  pub fn max(&self) -> Option<usize> { self.max }

  pub fn tags<T: Draft>(&self, form: &FormSession<T>) -> Result<Vec<String>> {
    Ok(serde_json::from_value(form.field(self.path.as_str())?)?)
  }

  fn store<T: Draft>(&self, form: &mut FormSession<T>, tags: Vec<String>) -> Result<()> {
    form.set_field(
      self.path.as_str(),
      Value::Array(tags.into_iter().map(Value::String).collect()),
    )
  }

  fn is_full(&self, count: usize) -> bool { self.max.is_some_and(|max| count >= max) }

  /// Add one tag. Returns `false` when `raw` is blank, already present, or
  /// the list is full.
  pub fn add_tag<T: Draft>(&self, form: &mut FormSession<T>, raw: &str) -> Result<bool> {
    let value = raw.trim();
    if value.is_empty() {
      return Ok(false);
    }
    let mut tags = self.tags(form)?;
    if tags.iter().any(|t| t == value) || self.is_full(tags.len()) {
      return Ok(false);
    }
    tags.push(value.to_owned());
    self.store(form, tags)?;
    Ok(true)
  }

  /// Split `text` into candidate tags and add each in order, stopping once
  /// the list is full. Returns how many were added.
  pub fn bulk_add<T: Draft>(&self, form: &mut FormSession<T>, text: &str) -> Result<usize> {
    let mut added = 0;
    for part in split_list(text) {
      if self.is_full(self.tags(form)?.len()) {
        break;
      }
      if self.add_tag(form, &part)? {
        added += 1;
      }
    }
    Ok(added)
  }

  pub fn remove_tag<T: Draft>(&self, form: &mut FormSession<T>, index: usize) -> Result<bool> {
    let mut tags = self.tags(form)?;
    if index >= tags.len() {
      return Ok(false);
    }
    tags.remove(index);
    self.store(form, tags)?;
    Ok(true)
  }

  /// Enter or comma commit the pending text; the pending text is cleared
  /// only if the tag was accepted. Backspace on empty pending text removes
  /// the last tag.
  pub fn handle_key<T: Draft>(&mut self, form: &mut FormSession<T>, key: TagKey) -> Result<KeyOutcome> {
    let blank = self.pending.trim().is_empty();
    match key {
      TagKey::Enter | TagKey::Comma if !blank => {
        if self.add_tag(form, &self.pending)? {
          self.pending.clear();
          Ok(KeyOutcome::Added(1))
        } else {
          Ok(KeyOutcome::Rejected)
        }
      }
      TagKey::Enter => Ok(KeyOutcome::Ignored),
      TagKey::Comma => {
        self.pending.push(',');
        Ok(KeyOutcome::Edited)
      }
      TagKey::Backspace if self.pending.is_empty() => {
        let mut tags = self.tags(form)?;
        if tags.pop().is_none() {
          return Ok(KeyOutcome::Ignored);
        }
        self.store(form, tags)?;
        Ok(KeyOutcome::Removed)
      }
      TagKey::Backspace => {
        self.pending.pop();
        Ok(KeyOutcome::Edited)
      }
      TagKey::Char(c) => {
        self.pending.push(c);
        Ok(KeyOutcome::Edited)
      }
    }
  }

  /// Pasted text containing a comma is bulk-added instead of typed; the
  /// pending text is cleared when at least one tag was added. Other text is
  /// appended to the pending text.
  pub fn paste<T: Draft>(&mut self, form: &mut FormSession<T>, text: &str) -> Result<KeyOutcome> {
    if !text.contains(',') {
      self.pending.push_str(text);
      return Ok(KeyOutcome::Edited);
    }
    let added = self.bulk_add(form, text)?;
    if added > 0 {
      self.pending.clear();
      Ok(KeyOutcome::Added(added))
    } else {
      Ok(KeyOutcome::Rejected)
    }
  }
}

/// `"- React, 'TypeScript';\n\nRedux"` → `["React", "TypeScript", "Redux"]`
fn split_list(text: &str) -> Vec<String> {
  text
    .split(SEPARATORS)
    .map(str::trim)
    .map(strip_quotes)
    .map(strip_marker)
    .filter(|part| !part.is_empty())
    .map(str::to_owned)
    .collect()
}

/// One quote character off each end, independently.
fn strip_quotes(part: &str) -> &str {
  let part = part.strip_prefix(QUOTES).unwrap_or(part);
  part.strip_suffix(QUOTES).unwrap_or(part)
}

fn strip_marker(part: &str) -> &str {
  match part.strip_prefix(LIST_MARKERS) {
    Some(rest) => rest.trim_start(),
    None => part,
  }
}

#[cfg(test)]
mod tests {
  use folio_core::project::Project;

  use super::*;

  fn form_with(tags: &[&str]) -> FormSession<Project> {
    FormSession::new(Project {
      tags: tags.iter().map(|t| t.to_string()).collect(),
      ..Default::default()
    })
  }

  #[test]
  fn bulk_add_splits_and_drops_blanks() {
    let mut form = form_with(&[]);
    let input = TagInput::new("tags", None).unwrap();
    assert_eq!(input.bulk_add(&mut form, "React, TypeScript,,  Redux").unwrap(), 3);
    assert_eq!(form.draft().tags, vec!["React", "TypeScript", "Redux"]);
  }

  #[test]
  fn split_handles_quotes_markers_and_separators() {
    assert_eq!(
      split_list("- Rust; \"Go\"\t• Zig\n'Deno'"),
      vec!["Rust", "Go", "Zig", "Deno"]
    );
  }

  #[test]
  fn duplicates_are_case_sensitive() {
    let mut form = form_with(&["Rust"]);
    let input = TagInput::new("tags", None).unwrap();
    assert!(!input.add_tag(&mut form, "  Rust ").unwrap());
    assert!(input.add_tag(&mut form, "rust").unwrap());
    assert_eq!(form.draft().tags, vec!["Rust", "rust"]);
  }

  #[test]
  fn max_is_never_exceeded() {
    let mut form = form_with(&["a"]);
    let input = TagInput::new("tags", Some(3)).unwrap();
    assert_eq!(input.bulk_add(&mut form, "b, c, d, e").unwrap(), 2);
    assert!(!input.add_tag(&mut form, "f").unwrap());
    assert_eq!(form.draft().tags.len(), 3);
  }

  #[test]
  fn enter_clears_pending_only_on_success() {
    let mut form = form_with(&["Rust"]);
    let mut input = TagInput::new("tags", None).unwrap();
    for c in "Rust".chars() {
      input.handle_key(&mut form, TagKey::Char(c)).unwrap();
    }
    assert_eq!(input.handle_key(&mut form, TagKey::Enter).unwrap(), KeyOutcome::Rejected);
    assert_eq!(input.pending(), "Rust");

    input.handle_key(&mut form, TagKey::Char('y')).unwrap();
    assert_eq!(input.handle_key(&mut form, TagKey::Comma).unwrap(), KeyOutcome::Added(1));
    assert_eq!(input.pending(), "");
    assert_eq!(form.draft().tags, vec!["Rust", "Rusty"]);
  }

  #[test]
  fn backspace_on_empty_pending_removes_last_tag() {
    let mut form = form_with(&["a", "b"]);
    let mut input = TagInput::new("tags", None).unwrap();
    assert_eq!(input.handle_key(&mut form, TagKey::Backspace).unwrap(), KeyOutcome::Removed);
    assert_eq!(form.draft().tags, vec!["a"]);

    input.handle_key(&mut form, TagKey::Char('x')).unwrap();
    assert_eq!(input.handle_key(&mut form, TagKey::Backspace).unwrap(), KeyOutcome::Edited);
    assert_eq!(form.draft().tags, vec!["a"]);
  }

  #[test]
  fn backspace_over_whitespace_edits_pending() {
    let mut form = form_with(&["a", "b"]);
    let mut input = TagInput::new("tags", None).unwrap();
    input.handle_key(&mut form, TagKey::Char(' ')).unwrap();
    input.handle_key(&mut form, TagKey::Char(' ')).unwrap();

    assert_eq!(input.handle_key(&mut form, TagKey::Backspace).unwrap(), KeyOutcome::Edited);
    assert_eq!(input.pending(), " ");
    assert_eq!(form.draft().tags, vec!["a", "b"]);

    assert_eq!(input.handle_key(&mut form, TagKey::Backspace).unwrap(), KeyOutcome::Edited);
    assert_eq!(input.handle_key(&mut form, TagKey::Backspace).unwrap(), KeyOutcome::Removed);
    assert_eq!(form.draft().tags, vec!["a"]);
  }

  #[test]
  fn paste_with_comma_bulk_adds() {
    let mut form = form_with(&[]);
    let mut input = TagInput::new("tags", None).unwrap();
    input.handle_key(&mut form, TagKey::Char('x')).unwrap();
    assert_eq!(input.paste(&mut form, "Axum, Tokio").unwrap(), KeyOutcome::Added(2));
    assert_eq!(input.pending(), "");

    assert_eq!(input.paste(&mut form, "Serde").unwrap(), KeyOutcome::Edited);
    assert_eq!(input.pending(), "Serde");
    assert_eq!(form.draft().tags, vec!["Axum", "Tokio"]);
  }

  #[test]
  fn remove_by_index() {
    let mut form = form_with(&["a", "b", "c"]);
    let input = TagInput::new("tags", None).unwrap();
    assert!(input.remove_tag(&mut form, 1).unwrap());
    assert!(!input.remove_tag(&mut form, 5).unwrap());
    assert_eq!(form.draft().tags, vec!["a", "c"]);
  }
}
