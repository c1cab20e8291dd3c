//! Work experience entries and the career summary singleton.

use serde::{Deserialize, Serialize};

use crate::{
  id::Identified,
  validate::{FieldErrors, Rules, Validate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSummary {
  pub description: String,
}

impl Validate for CareerSummary {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .min_chars("description", &self.description, 10, "Description must be at least 10 characters")
      .finish()
  }
}

/// One job. Stored records are [`ExperienceRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
  pub position:         String,
  pub company:          String,
  pub location:         String,
  pub period:           String,
  pub description:      String,
  #[serde(default)]
  pub responsibilities: Vec<String>,
}

pub type ExperienceRecord = Identified<Experience>;

impl Validate for Experience {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("position", &self.position, "Position is required")
      .required("company", &self.company, "Company is required")
      .required("location", &self.location, "Location is required")
      .required("period", &self.period, "Period is required")
      .min_chars("description", &self.description, 10, "Description must be at least 10 characters")
      .min_items("responsibilities", &self.responsibilities, 1, "At least one responsibility is required")
      .finish()
  }
}
