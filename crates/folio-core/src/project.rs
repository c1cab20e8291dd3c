//! Portfolio projects.

use serde::{Deserialize, Serialize};

use crate::{
  id::Identified,
  validate::{FieldErrors, Rules, Validate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub title:       String,
  pub description: String,
  pub category:    String,
  #[serde(default)]
  pub tags:        Vec<String>,
  #[serde(default)]
  pub demo_url:    Option<String>,
  #[serde(default)]
  pub repo_url:    Option<String>,
  #[serde(default)]
  pub features:    Vec<String>,
  #[serde(default)]
  pub is_featured: bool,
  /// URL of the stored image; empty until the server has one.
  #[serde(default)]
  pub image:       String,
  /// Local image file to upload with the next create or update.
  #[serde(default)]
  pub image_file:  Option<String>,
}

pub type ProjectRecord = Identified<Project>;

impl Validate for Project {
  fn validate(&self) -> FieldErrors {
    let has_image =
      !self.image.is_empty() || self.image_file.as_deref().is_some_and(|f| !f.is_empty());
    Rules::new()
      .required("title", &self.title, "Title is required")
      .required("description", &self.description, "Description is required")
      .required("category", &self.category, "Category is required")
      .min_items("tags", &self.tags, 1, "At least one tag is required")
      .optional_url("demoUrl", self.demo_url.as_deref(), "Demo URL must be a valid URL")
      .optional_url("repoUrl", self.repo_url.as_deref(), "Repo URL must be a valid URL")
      .each_required("features", &self.features, "Feature is required")
      .check(has_image, "imageFile", "Image is required")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn project() -> Project {
    Project {
      title: "Folio".into(),
      description: "Portfolio admin".into(),
      category: "Tools".into(),
      tags: vec!["Rust".into()],
      features: vec!["Fast".into()],
      ..Default::default()
    }
  }

  #[test]
  fn new_project_needs_an_image_file() {
    let p = project();
    assert_eq!(p.validate().get("imageFile"), Some("Image is required"));

    let with_file = Project { image_file: Some("./shot.png".into()), ..project() };
    assert!(with_file.is_valid());
  }

  #[test]
  fn existing_image_satisfies_edit() {
    let p = Project { image: "https://cdn.example.com/p.png".into(), ..project() };
    assert!(p.is_valid());
  }

  #[test]
  fn empty_feature_is_flagged_by_index() {
    let p = Project {
      image: "https://cdn.example.com/p.png".into(),
      features: vec!["Fast".into(), String::new()],
      ..project()
    };
    assert_eq!(p.validate().get("features.1"), Some("Feature is required"));
  }
}
