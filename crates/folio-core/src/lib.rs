//! Core types for the Folio portfolio administration client.
//!
//! Entity records, their validation schemas, typed field paths into drafts,
//! session records and the notification seam. This crate has no HTTP or UI
//! dependencies; `folio-client`, `folio-forms` and `folio-cli` build on it.

pub mod about;
pub mod blog;
pub mod education;
pub mod error;
pub mod experience;
pub mod id;
pub mod notify;
pub mod path;
pub mod profile;
pub mod project;
pub mod session;
pub mod skill;
pub mod validate;

pub use error::{Error, Result};
pub use id::{Identified, ResourceId};
pub use notify::{Notification, Notifier, UserMessage};
pub use validate::{FieldErrors, Validate};
