//! Authenticated session records and the login form.

use serde::{Deserialize, Serialize};

use crate::validate::{FieldErrors, Rules, Validate};

/// The signed-in owner, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub role:  String,
}

/// User identity plus bearer token. Created on login, its token replaced on
/// refresh, removed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub user:  Option<User>,
  pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
  pub email:    String,
  pub password: String,
}

impl Validate for LoginForm {
  fn validate(&self) -> FieldErrors {
    Rules::new()
      .email("email", &self.email, "Please enter a valid email address")
      .min_chars("password", &self.password, 6, "Password must be at least 6 characters")
      .finish()
  }
}
