//! A named array field edited as a list of sub-forms.
//!
//! The bound array never drops below one entry: attaching to an empty array
//! synthesizes one default entry, and removing the last entry does nothing.
//! Each entry carries a generated id that survives inserts, removals and
//! moves of its neighbours, so the UI can keep focus on the same entry.

use folio_core::{Error, Result, path::FieldPath};
use serde_json::Value;
use uuid::Uuid;

use crate::form::{Draft, FormSession};

#[derive(Debug, Clone)]
pub struct FieldArray {
  path:         FieldPath,
  default_item: Value,
  max:          Option<usize>,
  ids:          Vec<Uuid>,
}

impl FieldArray {
  /// Bind to the array at `path` in `form`. Safe to call again on the same
  /// form: a default entry is only added when the array is empty.
  pub fn attach<T: Draft>(
    form: &mut FormSession<T>,
    path: &str,
    default_item: Value,
    max: Option<usize>,
  ) -> Result<Self> {
    let mut array = Self {
      path: FieldPath::parse(path)?,
      default_item,
      max,
      ids: Vec::new(),
    };
    array.realign(form)?;
    Ok(array)
  }

  /// Re-read the bound array after the form changed underneath (e.g. a
  /// reset). Ids of surviving leading entries are kept; extra entries get
  /// fresh ids.
  pub fn realign<T: Draft>(&mut self, form: &mut FormSession<T>) -> Result<()> {
    let path = self.path.clone();
    let default_item = self.default_item.clone();
    let len = form.edit_json(|json| {
      let items = array_at(&path, json)?;
      if items.is_empty() {
        items.push(default_item);
      }
      Ok(items.len())
    })?;
    self.ids.truncate(len);
    while self.ids.len() < len {
      self.ids.push(Uuid::new_v4());
    }
    Ok(())
  }

  pub fn path(&self) -> &FieldPath { &self.path }

  pub fn ids(&self) -> &[Uuid] { &self.ids }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }

  pub fn max(&self) -> Option<usize> { self.max }

  /// Path of the `index`th entry, e.g. `features.2`.
  pub fn entry_path(&self, index: usize) -> FieldPath { self.path.index(index) }

  pub fn can_add(&self) -> bool { self.max.is_none_or(|max| self.len() < max) }

  pub fn can_remove(&self) -> bool { self.len() > 1 }

  /// Append a default entry. Returns `false` at the maximum.
  pub fn add<T: Draft>(&mut self, form: &mut FormSession<T>) -> Result<bool> {
    if !self.can_add() {
      return Ok(false);
    }
    let path = self.path.clone();
    let item = self.default_item.clone();
    form.edit_json(|json| {
      array_at(&path, json)?.push(item);
      Ok(())
    })?;
    self.ids.push(Uuid::new_v4());
    Ok(true)
  }

  /// Remove the entry at `index`. Returns `false` for the last remaining
  /// entry or an out-of-range index.
  pub fn remove<T: Draft>(&mut self, form: &mut FormSession<T>, index: usize) -> Result<bool> {
    if !self.can_remove() || index >= self.len() {
      return Ok(false);
    }
    let path = self.path.clone();
    form.edit_json(|json| {
      array_at(&path, json)?.remove(index);
      Ok(())
    })?;
    self.ids.remove(index);
    Ok(true)
  }

  /// Move the entry at `from` so it ends up at `to`.
  pub fn move_entry<T: Draft>(
    &mut self,
    form: &mut FormSession<T>,
    from: usize,
    to: usize,
  ) -> Result<bool> {
    if from >= self.len() || to >= self.len() || from == to {
      return Ok(false);
    }
    let path = self.path.clone();
    form.edit_json(|json| {
      let items = array_at(&path, json)?;
      let item = items.remove(from);
      items.insert(to, item);
      Ok(())
    })?;
    let id = self.ids.remove(from);
    self.ids.insert(to, id);
    Ok(true)
  }
}

fn array_at<'v>(path: &FieldPath, json: &'v mut Value) -> Result<&'v mut Vec<Value>> {
  match path.get_mut(json)? {
    Value::Array(items) => Ok(items),
    _ => Err(Error::FieldType { path: path.to_string() }),
  }
}

#[cfg(test)]
mod tests {
  use folio_core::{about::AboutMe, experience::Experience};
  use serde_json::json;

  use super::*;

  fn features(form: &mut FormSession<AboutMe>, max: Option<usize>) -> FieldArray {
    FieldArray::attach(form, "features", json!({ "icon": "", "title": "", "description": "" }), max)
      .unwrap()
  }

  #[test]
  fn empty_array_gets_exactly_one_entry() {
    let mut form = FormSession::new(AboutMe::default());
    let array = features(&mut form, None);
    assert_eq!(array.len(), 1);
    assert_eq!(form.draft().features.len(), 1);

    let again = features(&mut form, None);
    assert_eq!(again.len(), 1);
    assert_eq!(form.draft().features.len(), 1);
  }

  #[test]
  fn last_entry_cannot_be_removed() {
    let mut form = FormSession::new(AboutMe::default());
    let mut array = features(&mut form, None);
    assert!(!array.remove(&mut form, 0).unwrap());
    assert_eq!(form.draft().features.len(), 1);
  }

  #[test]
  fn add_stops_at_max() {
    let mut form = FormSession::new(AboutMe::default());
    let mut array = features(&mut form, Some(2));
    assert!(array.add(&mut form).unwrap());
    assert!(!array.add(&mut form).unwrap());
    assert_eq!(form.draft().features.len(), 2);
  }

  #[test]
  fn ids_survive_neighbour_removal_and_moves() {
    let mut form = FormSession::new(Experience {
      responsibilities: vec!["a".into(), "b".into(), "c".into()],
      ..Default::default()
    });
    let mut array = FieldArray::attach(&mut form, "responsibilities", json!(""), None).unwrap();
    let [a, b, c] = [array.ids()[0], array.ids()[1], array.ids()[2]];

    assert!(array.remove(&mut form, 1).unwrap());
    assert_eq!(array.ids(), &[a, c]);
    assert_eq!(form.draft().responsibilities, vec!["a", "c"]);

    assert!(array.move_entry(&mut form, 1, 0).unwrap());
    assert_eq!(array.ids(), &[c, a]);
    assert_eq!(form.draft().responsibilities, vec!["c", "a"]);
    assert_ne!(a, b);
  }

  #[test]
  fn non_array_field_is_rejected() {
    let mut form = FormSession::new(AboutMe::default());
    assert!(FieldArray::attach(&mut form, "description", json!(""), None).is_err());
  }
}
