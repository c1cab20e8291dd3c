//! Skills and the categories that group them.

use serde::{Deserialize, Serialize};

use crate::{
  id::Identified,
  validate::{FieldErrors, Rules, Validate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
  pub name: String,
  pub icon: String,
}

pub type SkillCategoryRecord = Identified<SkillCategory>;

impl Validate for SkillCategory {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("name", &self.name, "Name is required")
      .required("icon", &self.icon, "Icon is required")
      .finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub name:     String,
  pub icon:     String,
  /// Category name, not id.
  pub category: String,
}

pub type SkillRecord = Identified<Skill>;

impl Validate for Skill {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("name", &self.name, "Name is required")
      .required("icon", &self.icon, "Icon is required")
      .required("category", &self.category, "Category is required")
      .finish()
  }
}
