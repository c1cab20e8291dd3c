//! Server-issued identifiers and the record envelope that carries them.
//!
//! The backend issues numeric ids for some collections (skills, blog posts)
//! and string ids for others (projects, experience). [`ResourceId`] accepts
//! either on the wire and is always used as a path segment.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Opaque id assigned by the server on creation. Never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ResourceId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<u64> for ResourceId {
  fn from(n: u64) -> Self { Self(n.to_string()) }
}

impl<'de> Deserialize<'de> for ResourceId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct IdVisitor;

    impl de::Visitor<'_> for IdVisitor {
      type Value = ResourceId;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<ResourceId, E> {
        if v.is_empty() {
          return Err(E::invalid_value(de::Unexpected::Str(v), &self));
        }
        Ok(ResourceId(v.to_owned()))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<ResourceId, E> {
        Ok(ResourceId(v.to_string()))
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<ResourceId, E> {
        Ok(ResourceId(v.to_string()))
      }
    }

    deserializer.deserialize_any(IdVisitor)
  }
}

/// A stored record: the server id plus the owner-editable fields.
///
/// Forms only ever edit `value`, so the id cannot drift during an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identified<T> {
  pub id:    ResourceId,
  #[serde(flatten)]
  pub value: T,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_numeric_and_string_ids() {
    let n: ResourceId = serde_json::from_str("42").unwrap();
    let s: ResourceId = serde_json::from_str("\"6650ab\"").unwrap();
    assert_eq!(n.as_str(), "42");
    assert_eq!(s.to_string(), "6650ab");
  }

  #[test]
  fn rejects_empty_id() {
    assert!(serde_json::from_str::<ResourceId>("\"\"").is_err());
  }
}
