//! Dotted field paths into a draft's JSON form, e.g. `features.0.title`.
//!
//! Paths are checked against the draft before every read or write: a path
//! that does not already resolve is rejected with
//! [`Error::UnknownField`] instead of silently creating a new key.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
  raw:      String,
  segments: Vec<String>,
}

impl FieldPath {
  pub fn parse(raw: &str) -> Result<Self> {
    let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
    if segments.iter().any(String::is_empty) {
      return Err(Error::UnknownField(raw.to_owned()));
    }
    Ok(Self { raw: raw.to_owned(), segments })
  }

  pub fn as_str(&self) -> &str { &self.raw }

  /// The path of element `index` inside the array at this path.
  pub fn index(&self, index: usize) -> Self {
    self.child(&index.to_string())
  }

  pub fn child(&self, key: &str) -> Self {
    let mut segments = self.segments.clone();
    segments.push(key.to_owned());
    Self { raw: format!("{}.{key}", self.raw), segments }
  }

  pub fn get<'v>(&self, root: &'v Value) -> Result<&'v Value> {
    let mut current = root;
    for segment in &self.segments {
      current = match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
      }
      .ok_or_else(|| self.unknown())?;
    }
    Ok(current)
  }

  pub fn get_mut<'v>(&self, root: &'v mut Value) -> Result<&'v mut Value> {
    let mut current = root;
    for segment in &self.segments {
      current = match current {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => {
          segment.parse::<usize>().ok().and_then(move |i| items.get_mut(i))
        }
        _ => None,
      }
      .ok_or_else(|| self.unknown())?;
    }
    Ok(current)
  }

  /// Replace the value at this path. The path must already exist, and the
  /// new value must have the same JSON shape (string for string, array for
  /// array, …). `null` slots accept anything.
  pub fn set(&self, root: &mut Value, value: Value) -> Result<()> {
    let slot = self.get_mut(root)?;
    if !same_shape(slot, &value) {
      return Err(Error::FieldType { path: self.raw.clone() });
    }
    *slot = value;
    Ok(())
  }

  fn unknown(&self) -> Error { Error::UnknownField(self.raw.clone()) }
}

fn same_shape(old: &Value, new: &Value) -> bool {
  matches!(
    (old, new),
    (Value::Null, _)
      | (_, Value::Null)
      | (Value::Bool(_), Value::Bool(_))
      | (Value::Number(_), Value::Number(_))
      | (Value::String(_), Value::String(_))
      | (Value::Array(_), Value::Array(_))
      | (Value::Object(_), Value::Object(_))
  )
}

impl FromStr for FieldPath {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for FieldPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn draft() -> Value {
    json!({
      "title": "Folio",
      "features": [{ "title": "Fast" }, { "title": "Small" }],
      "demoUrl": null
    })
  }

  #[test]
  fn get_nested_array_element() {
    let d = draft();
    let p = FieldPath::parse("features.1.title").unwrap();
    assert_eq!(p.get(&d).unwrap(), "Small");
  }

  #[test]
  fn missing_paths_are_rejected() {
    let d = draft();
    for raw in ["subtitle", "features.2.title", "features.x", "title.0"] {
      let p = FieldPath::parse(raw).unwrap();
      assert!(matches!(p.get(&d), Err(Error::UnknownField(_))), "{raw}");
    }
    assert!(FieldPath::parse("features..title").is_err());
  }

  #[test]
  fn set_replaces_existing_value() {
    let mut d = draft();
    let p = FieldPath::parse("features.0.title").unwrap();
    p.set(&mut d, json!("Quick")).unwrap();
    assert_eq!(d["features"][0]["title"], "Quick");
  }

  #[test]
  fn set_does_not_create_keys() {
    let mut d = draft();
    let p = FieldPath::parse("subtitle").unwrap();
    assert!(p.set(&mut d, json!("x")).is_err());
    assert!(d.get("subtitle").is_none());
  }

  #[test]
  fn set_checks_shape() {
    let mut d = draft();
    let p = FieldPath::parse("features").unwrap();
    assert!(matches!(
      p.set(&mut d, json!("oops")),
      Err(Error::FieldType { .. })
    ));
    let url = FieldPath::parse("demoUrl").unwrap();
    url.set(&mut d, json!("https://example.com")).unwrap();
  }

  #[test]
  fn child_and_index_build_paths() {
    let p = FieldPath::parse("features").unwrap().index(1).child("title");
    assert_eq!(p.as_str(), "features.1.title");
  }
}
