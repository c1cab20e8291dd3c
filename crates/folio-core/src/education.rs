//! The education singleton document and its sub-record arrays.

use serde::{Deserialize, Serialize};

use crate::validate::{FieldErrors, Rules, Validate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
  pub icon:        String,
  pub title:       String,
  pub description: String,
}

impl Validate for Achievement {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("icon", &self.icon, "Icon is required")
      .required("title", &self.title, "Title is required")
      .required("description", &self.description, "Description is required")
      .finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub name: String,
  pub icon: String,
}

impl Validate for Subject {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("name", &self.name, "Subject name is required")
      .required("icon", &self.icon, "Icon is required")
      .finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub name:     String,
  pub provider: String,
  pub year:     String,
  pub icon:     String,
}

impl Validate for Course {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("name", &self.name, "Course name is required")
      .required("provider", &self.provider, "Provider is required")
      .required("year", &self.year, "Year is required")
      .required("icon", &self.icon, "Icon is required")
      .finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
  pub degree:       String,
  pub institution:  String,
  pub location:     String,
  pub period:       String,
  pub description:  String,
  pub cgpa:         String,
  #[serde(default)]
  pub achievements: Vec<Achievement>,
  #[serde(default)]
  pub subjects:     Vec<Subject>,
  #[serde(default)]
  pub courses:      Vec<Course>,
}

impl Validate for Education {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("degree", &self.degree, "Degree is required")
      .required("institution", &self.institution, "Institution is required")
      .required("location", &self.location, "Location is required")
      .required("period", &self.period, "Period is required")
      .min_chars("description", &self.description, 10, "Description must be at least 10 characters")
      .required("cgpa", &self.cgpa, "CGPA is required")
      .min_items("achievements", &self.achievements, 1, "At least one achievement is required")
      .each("achievements", &self.achievements)
      .min_items("subjects", &self.subjects, 1, "At least one subject is required")
      .each("subjects", &self.subjects)
      .min_items("courses", &self.courses, 1, "At least one course is required")
      .each("courses", &self.courses)
      .finish()
  }
}

/// Partial update carrying only the arrays that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EducationPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub achievements: Option<Vec<Achievement>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subjects:     Option<Vec<Subject>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub courses:      Option<Vec<Course>>,
}

/// A single item appended from one of the `/education/add/*` screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationItem {
  Achievement(Achievement),
  Subject(Subject),
  Course(Course),
}

impl EducationItem {
  /// Append this item to the matching array of `current` and return a patch
  /// that replaces only that array.
  pub fn append_to(self, current: &Education) -> EducationPatch {
    match self {
      EducationItem::Achievement(a) => {
        let mut all = current.achievements.clone();
        all.push(a);
        EducationPatch { achievements: Some(all), ..Default::default() }
      }
      EducationItem::Subject(s) => {
        let mut all = current.subjects.clone();
        all.push(s);
        EducationPatch { subjects: Some(all), ..Default::default() }
      }
      EducationItem::Course(c) => {
        let mut all = current.courses.clone();
        all.push(c);
        EducationPatch { courses: Some(all), ..Default::default() }
      }
    }
  }
}
