//! Blog posts. Shown as a count on the dashboard.

use serde::{Deserialize, Serialize};

use crate::{
  id::Identified,
  validate::{FieldErrors, Rules, Validate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
  pub title:          String,
  pub slug:           String,
  #[serde(default)]
  pub excerpt:        String,
  #[serde(default)]
  pub content:        String,
  #[serde(default)]
  pub cover_image:    String,
  /// ISO date as sent by the server.
  #[serde(default)]
  pub published_date: String,
  #[serde(default)]
  pub tags:           Vec<String>,
}

pub type BlogPostRecord = Identified<BlogPost>;

impl Validate for BlogPost {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("title", &self.title, "Title is required")
      .required("slug", &self.slug, "Slug is required")
      .finish()
  }
}
