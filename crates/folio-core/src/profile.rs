//! The owner's profile: a singleton document with no id.

use serde::{Deserialize, Serialize};

use crate::validate::{FieldErrors, Rules, Validate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub name:           String,
  pub title:          String,
  /// Free-text summary, e.g. "5+ years".
  pub experience:     String,
  /// URL of the current thumbnail, as stored by the server.
  #[serde(default)]
  pub thumbnail:      String,
  pub resume_file:    String,
  pub github:         String,
  pub linkedin:       String,
  pub twitter:        String,
  /// Local file chosen to replace the thumbnail. Never received from the
  /// server; when set, the update is sent as multipart form data.
  #[serde(default)]
  pub thumbnail_file: Option<String>,
}

impl Validate for Profile {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .required("name", &self.name, "Name is required")
      .required("title", &self.title, "Title is required")
      .required("experience", &self.experience, "Experience information is required")
      .url("resumeFile", &self.resume_file, "Please enter a valid resume URL")
      .url("github", &self.github, "Please enter a valid GitHub URL")
      .url("linkedin", &self.linkedin, "Please enter a valid LinkedIn URL")
      .url("twitter", &self.twitter, "Please enter a valid Twitter URL")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid() -> Profile {
    Profile {
      name:           "Ada".into(),
      title:          "Engineer".into(),
      experience:     "5+ years".into(),
      thumbnail:      String::new(),
      resume_file:    "https://example.com/cv.pdf".into(),
      github:         "https://github.com/ada".into(),
      linkedin:       "https://linkedin.com/in/ada".into(),
      twitter:        "https://x.com/ada".into(),
      thumbnail_file: None,
    }
  }

  #[test]
  fn valid_profile_passes() {
    assert!(valid().is_valid());
  }

  #[test]
  fn reports_each_bad_link() {
    let mut p = valid();
    p.github = "ada".into();
    p.twitter = String::new();
    let errors = p.validate();
    assert_eq!(errors.get("github"), Some("Please enter a valid GitHub URL"));
    assert_eq!(errors.get("twitter"), Some("Please enter a valid Twitter URL"));
    assert_eq!(errors.len(), 2);
  }

  #[test]
  fn camel_case_wire_names() {
    let json = serde_json::to_value(valid()).unwrap();
    assert!(json.get("resumeFile").is_some());
    assert_eq!(json.get("thumbnailFile"), Some(&serde_json::Value::Null));
  }
}
