//! The "about me" singleton document.

use serde::{Deserialize, Serialize};

use crate::validate::{FieldErrors, Rules, Validate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
  pub label: String,
  pub value: String,
}

impl Validate for PersonalInfo {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("label", &self.label, "Label is required")
      .required("value", &self.value, "Value is required")
      .finish()
  }
}

/// A highlighted feature card: icon name, heading and body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
  pub icon:        String,
  pub title:       String,
  pub description: String,
}

impl Validate for Feature {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("icon", &self.icon, "Icon name is required")
      .required("title", &self.title, "Title is required")
      .required("description", &self.description, "Description is required")
      .finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMe {
  pub description:   String,
  #[serde(default)]
  pub personal_info: Vec<PersonalInfo>,
  #[serde(default)]
  pub features:      Vec<Feature>,
}

impl Validate for AboutMe {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .min_chars("description", &self.description, 10, "Description must be at least 10 characters")
      .min_items("personalInfo", &self.personal_info, 1, "At least one personal info item is required")
      .each("personalInfo", &self.personal_info)
      .min_items("features", &self.features, 1, "At least one feature is required")
      .each("features", &self.features)
      .finish()
  }
}
