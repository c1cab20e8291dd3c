//! Sortable, filterable, paged tables.
//!
//! Rows are paged locally ([`PAGE_SIZE`] per page) unless a
//! [`ServerPagination`] descriptor is installed, in which case page changes
//! are handed to a callback and the server's totals are shown as-is.

use std::cmp::Ordering;

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

pub const PAGE_SIZE: usize = 10;
pub const MAX_VISIBLE_PAGES: usize = 5;
pub const EMPTY_MESSAGE: &str = "No results found.";

/// A row the table can display. `cell` returns the display text for a
/// column key; sorting and filtering work on that text.
pub trait TableRow {
  fn cell(&self, key: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
  pub key:      String,
  pub label:    String,
  pub sortable: bool,
}

impl Column {
  pub fn new(key: &str, label: &str) -> Self {
    Self { key: key.to_owned(), label: label.to_owned(), sortable: false }
  }

  pub fn sortable(mut self) -> Self {
    self.sortable = true;
    self
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
  Ascending,
  Descending,
}

/// Server-reported paging. `current_page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerPagination {
  pub page_count:   usize,
  pub current_page: usize,
}

/// What the body of the table shows.
#[derive(Debug, PartialEq, Eq)]
pub enum TableBody<'a, R> {
  Rows(Vec<&'a R>),
  /// One row spanning `span` columns.
  Empty { message: &'static str, span: usize },
}

type PageCallback = Box<dyn FnMut(usize) + Send>;

pub struct DataTable<R> {
  columns:        Vec<Column>,
  rows:           Vec<R>,
  sort:           Option<(usize, SortDirection)>,
  filter:         String,
  /// 0-based, local paging only.
  page:           usize,
  cursor:         usize,
  server:         Option<ServerPagination>,
  on_page_change: Option<PageCallback>,
}

impl<R: TableRow> DataTable<R> {
  pub fn new(columns: Vec<Column>, rows: Vec<R>) -> Self {
    Self {
      columns,
      rows,
      sort: None,
      filter: String::new(),
      page: 0,
      cursor: 0,
      server: None,
      on_page_change: None,
    }
  }

  /// Switch to server-side paging. `on_page_change` receives the requested
  /// 1-based page; the owner fetches it and calls
  /// [`set_server_page`](Self::set_server_page).
  pub fn with_server_pagination(
    mut self,
    pagination: ServerPagination,
    on_page_change: impl FnMut(usize) + Send + 'static,
  ) -> Self {
    self.server = Some(pagination);
    self.on_page_change = Some(Box::new(on_page_change));
    self
  }

  pub fn columns(&self) -> &[Column] { &self.columns }

  pub fn rows(&self) -> &[R] { &self.rows }

  pub fn set_rows(&mut self, rows: Vec<R>) {
    self.rows = rows;
    self.page = self.page.min(self.page_count() - 1);
    self.clamp_cursor();
  }

  pub fn set_server_page(&mut self, pagination: ServerPagination, rows: Vec<R>) {
    self.server = Some(pagination);
    self.set_rows(rows);
  }

  pub fn server_pagination(&self) -> Option<ServerPagination> { self.server }

  // ── Sorting ───────────────────────────────────────────────────────────────

  pub fn sort_state(&self) -> Option<(usize, SortDirection)> { self.sort }

  /// Advance the sort on column `index`: unsorted → ascending → descending
  /// → unsorted. A different column starts at ascending. Returns `false`
  /// for columns that are not sortable.
  pub fn toggle_sort(&mut self, index: usize) -> bool {
    if !self.columns.get(index).is_some_and(|c| c.sortable) {
      return false;
    }
    self.sort = match self.sort {
      Some((current, SortDirection::Ascending)) if current == index => {
        Some((index, SortDirection::Descending))
      }
      Some((current, SortDirection::Descending)) if current == index => None,
      _ => Some((index, SortDirection::Ascending)),
    };
    self.cursor = 0;
    true
  }

  // ── Filtering ─────────────────────────────────────────────────────────────

  pub fn filter(&self) -> &str { &self.filter }

  pub fn set_filter(&mut self, filter: &str) {
    self.filter = filter.to_owned();
    self.page = 0;
    self.cursor = 0;
  }

  /// Filtered and sorted rows, before paging.
  fn arranged(&self) -> Vec<&R> {
    let mut rows: Vec<&R> = if self.filter.is_empty() {
      self.rows.iter().collect()
    } else {
      let matcher = SkimMatcherV2::default();
      self
        .rows
        .iter()
        .filter(|row| {
          let text = self
            .columns
            .iter()
            .map(|c| row.cell(&c.key))
            .collect::<Vec<_>>()
            .join(" ");
          matcher.fuzzy_match(&text, &self.filter).is_some()
        })
        .collect()
    };

    if let Some((index, direction)) = self.sort {
      let key = &self.columns[index].key;
      rows.sort_by(|a, b| {
        let ord = compare_cells(&a.cell(key), &b.cell(key));
        match direction {
          SortDirection::Ascending => ord,
          SortDirection::Descending => ord.reverse(),
        }
      });
    }
    rows
  }

  // ── Paging ────────────────────────────────────────────────────────────────

  /// Always at least 1.
  pub fn page_count(&self) -> usize {
    match self.server {
      Some(s) => s.page_count.max(1),
      None => self.arranged().len().div_ceil(PAGE_SIZE).max(1),
    }
  }

  /// 1-based.
  pub fn current_page(&self) -> usize {
    match self.server {
      Some(s) => s.current_page.max(1),
      None => self.page + 1,
    }
  }

  pub fn can_previous(&self) -> bool { self.current_page() > 1 }

  pub fn can_next(&self) -> bool { self.current_page() < self.page_count() }

  /// Go to 1-based `page`. Out-of-range pages are ignored.
  pub fn go_to(&mut self, page: usize) -> bool {
    if page == 0 || page > self.page_count() || page == self.current_page() {
      return false;
    }
    match (&self.server, &mut self.on_page_change) {
      (Some(_), Some(callback)) => {
        tracing::debug!(page, "requesting server page");
        callback(page);
      }
      _ => self.page = page - 1,
    }
    self.cursor = 0;
    true
  }

  pub fn next_page(&mut self) -> bool { self.go_to(self.current_page() + 1) }

  pub fn previous_page(&mut self) -> bool {
    self.current_page() > 1 && self.go_to(self.current_page() - 1)
  }

  /// Up to [`MAX_VISIBLE_PAGES`] page numbers around the current page.
  pub fn page_window(&self) -> Vec<usize> {
    page_window(self.current_page(), self.page_count())
  }

  pub fn status(&self) -> String {
    format!("Page {} of {}", self.current_page(), self.page_count())
  }

  /// Rows on the current page. Server pages are shown whole.
  pub fn page_rows(&self) -> Vec<&R> {
    let rows = self.arranged();
    if self.server.is_some() {
      return rows;
    }
    rows.into_iter().skip(self.page * PAGE_SIZE).take(PAGE_SIZE).collect()
  }

  pub fn body(&self) -> TableBody<'_, R> {
    let rows = self.page_rows();
    if rows.is_empty() {
      TableBody::Empty { message: EMPTY_MESSAGE, span: self.columns.len() }
    } else {
      TableBody::Rows(rows)
    }
  }

  // ── Cursor ────────────────────────────────────────────────────────────────

  pub fn cursor(&self) -> usize { self.cursor }

  pub fn cursor_down(&mut self) {
    if self.cursor + 1 < self.page_rows().len() {
      self.cursor += 1;
    }
  }

  pub fn cursor_up(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

  pub fn selected(&self) -> Option<&R> { self.page_rows().get(self.cursor).copied() }

  fn clamp_cursor(&mut self) {
    let len = self.page_rows().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }
}

/// Numeric cells sort before text; numbers by value, text case-insensitively
/// with the raw text as tiebreak. A total order.
fn compare_cells(a: &str, b: &str) -> Ordering {
  match (numeric(a), numeric(b)) {
    (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
  }
}

/// Finite numbers only; `NaN` and `inf` are text.
fn numeric(cell: &str) -> Option<f64> {
  cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn page_window(current: usize, total: usize) -> Vec<usize> {
  let half = MAX_VISIBLE_PAGES / 2;
  let mut start = current.saturating_sub(half).max(1);
  let end = total.min(start + MAX_VISIBLE_PAGES - 1);
  if end + 1 - start < MAX_VISIBLE_PAGES {
    start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
  }
  (start..=end).collect()
}
