//! Modal icon search-and-select.
//!
//! The catalog is filtered by case-insensitive substring on every
//! keystroke. The grid has 4 columns up to the breakpoint width and 6 above
//! it, and only the rows inside the viewport are materialized.

mod catalog;

pub use catalog::TABLER_ICONS;
use folio_core::Result;
use serde_json::Value;

use crate::form::{Draft, FormSession};

pub const NARROW_COLUMNS: usize = 4;
pub const WIDE_COLUMNS: usize = 6;
pub const DEFAULT_BREAKPOINT: u16 = 450;

/// One materialized grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCell {
  /// Index into [`IconPicker::matches`].
  pub index:    usize,
  pub row:      usize,
  pub column:   usize,
  pub name:     &'static str,
  /// The icon already chosen; it cannot be picked again.
  pub disabled: bool,
  pub focused:  bool,
}

#[derive(Debug, Clone)]
pub struct IconPicker {
  catalog:    &'static [&'static str],
  matches:    Vec<&'static str>,
  search:     String,
  selected:   String,
  open:       bool,
  breakpoint: u16,
  columns:    usize,
  rows:       usize,
  scroll:     usize,
  cursor:     usize,
}

impl IconPicker {
  pub fn new(selected: &str) -> Self { Self::with_catalog(TABLER_ICONS, selected) }

  pub fn with_catalog(catalog: &'static [&'static str], selected: &str) -> Self {
    Self {
      catalog,
      matches: catalog.to_vec(),
      search: String::new(),
      selected: selected.to_owned(),
      open: false,
      breakpoint: DEFAULT_BREAKPOINT,
      columns: NARROW_COLUMNS,
      rows: 1,
      scroll: 0,
      cursor: 0,
    }
  }

  /// Width at or above which the grid uses [`WIDE_COLUMNS`].
  pub fn with_breakpoint(mut self, breakpoint: u16) -> Self {
    self.breakpoint = breakpoint;
    self
  }

  pub fn is_open(&self) -> bool { self.open }

  pub fn open(&mut self) {
    self.open = true;
    self.set_search("");
  }

  pub fn close(&mut self) { self.open = false; }

  pub fn selected(&self) -> &str { &self.selected }

  /// "Change Icon" once an icon is chosen, "Add Icon" before.
  pub fn trigger_label(&self) -> &'static str {
    if self.selected.is_empty() { "Add Icon" } else { "Change Icon" }
  }

  // ── Search ────────────────────────────────────────────────────────────────

  pub fn search(&self) -> &str { &self.search }

  pub fn set_search(&mut self, text: &str) {
    self.search = text.to_owned();
    let needle = self.search.to_lowercase();
    self.matches = self
      .catalog
      .iter()
      .copied()
      .filter(|name| name.to_lowercase().contains(&needle))
      .collect();
    self.cursor = 0;
    self.scroll = 0;
  }

  pub fn push_char(&mut self, c: char) {
    let mut text = self.search.clone();
    text.push(c);
    self.set_search(&text);
  }

  pub fn pop_char(&mut self) {
    let mut text = self.search.clone();
    text.pop();
    self.set_search(&text);
  }

  pub fn matches(&self) -> &[&'static str] { &self.matches }

  // ── Layout ────────────────────────────────────────────────────────────────

  pub fn columns_for(&self, width: u16) -> usize {
    if width > self.breakpoint { WIDE_COLUMNS } else { NARROW_COLUMNS }
  }

  /// Record the viewport size; `rows` is how many grid rows fit.
  pub fn set_viewport(&mut self, width: u16, rows: usize) {
    let columns = self.columns_for(width);
    if columns != self.columns {
      self.columns = columns;
      self.scroll = 0;
    }
    self.rows = rows.max(1);
    self.keep_cursor_visible();
  }

  pub fn columns(&self) -> usize { self.columns }

  pub fn row_count(&self) -> usize { self.matches.len().div_ceil(self.columns) }

  /// Cells inside the viewport only.
  pub fn visible_cells(&self) -> Vec<IconCell> {
    let first = self.scroll * self.columns;
    let last = ((self.scroll + self.rows) * self.columns).min(self.matches.len());
    (first..last)
      .map(|index| {
        let name = self.matches[index];
        IconCell {
          index,
          row: index / self.columns - self.scroll,
          column: index % self.columns,
          name,
          disabled: name == self.selected,
          focused: index == self.cursor,
        }
      })
      .collect()
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  pub fn cursor(&self) -> usize { self.cursor }

  pub fn move_cursor(&mut self, dx: isize, dy: isize) {
    if self.matches.is_empty() {
      return;
    }
    let step = dy * self.columns as isize + dx;
    let last = self.matches.len() as isize - 1;
    self.cursor = (self.cursor as isize + step).clamp(0, last) as usize;
    self.keep_cursor_visible();
  }

  fn keep_cursor_visible(&mut self) {
    let row = self.cursor / self.columns;
    if row < self.scroll {
      self.scroll = row;
    } else if row >= self.scroll + self.rows {
      self.scroll = row + 1 - self.rows;
    }
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  /// Pick `matches()[index]`: close the modal and return the new value.
  /// `None` for the already-selected icon or an index out of range.
  pub fn select(&mut self, index: usize) -> Option<&'static str> {
    let name = *self.matches.get(index)?;
    if name == self.selected {
      return None;
    }
    self.selected = name.to_owned();
    self.open = false;
    Some(name)
  }

  /// Pick the focused icon and write it into `form` at `path` in one step.
  pub fn commit<T: Draft>(&mut self, form: &mut FormSession<T>, path: &str) -> Result<bool> {
    match self.select(self.cursor) {
      Some(name) => {
        form.set_field(path, Value::String(name.to_owned()))?;
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
