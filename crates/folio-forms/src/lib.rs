//! Headless editing widgets for the admin screens.
//!
//! Nothing here draws anything. Each type owns the state and rules of one
//! widget (a form draft, a repeatable group, a tag list, a paged table, an
//! icon grid) so the terminal UI only maps keys to calls and state to cells.

pub mod field_array;
pub mod form;
pub mod icons;
pub mod table;
pub mod tags;

pub use field_array::FieldArray;
pub use form::{Draft, FormSession};
pub use icons::IconPicker;
pub use table::{Column, DataTable, ServerPagination, SortDirection, TableBody, TableRow};
pub use tags::{KeyOutcome, TagInput, TagKey};
