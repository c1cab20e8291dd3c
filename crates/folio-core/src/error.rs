//! Error types for `folio-core`.

use thiserror::Error;

use crate::notify::UserMessage;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no such field: {0:?}")]
  UnknownField(String),

  #[error("field {path:?} cannot hold the given value")]
  FieldType { path: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl UserMessage for Error {
  fn user_message(&self) -> String { self.to_string() }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn user_message_names_the_field() {
    assert_eq!(
      Error::UnknownField("links.0.url".into()).user_message(),
      "no such field: \"links.0.url\""
    );
    assert_eq!(
      Error::FieldType { path: "tags".into() }.user_message(),
      "field \"tags\" cannot hold the given value"
    );
  }
}
