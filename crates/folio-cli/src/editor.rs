//! Form screens driven by a list of [`FieldSpec`]s.
//!
//! A [`FormEditor`] owns a [`FormSession`] plus the widget state its fields
//! need (field arrays, tag inputs, the icon picker). The rest of the app
//! talks to it through the object-safe [`Editor`] trait, so one screen type
//! covers every resource.

use std::collections::HashMap;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_client::ClientError;
use folio_core::Notification;
use folio_forms::{Draft, FieldArray, FormSession, IconPicker, TagInput, TagKey};
use serde_json::Value;

use crate::pages::Submission;

/// Widest terminal that still gets the narrow icon grid.
pub const ICON_GRID_BREAKPOINT: u16 = 90;

// ─── Specs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
  Input,
  /// Rendered masked.
  Secret,
  TextArea,
  Switch,
  Icon,
  /// A local file path to upload.
  File,
  Tags { max: Option<usize> },
  /// One of a fixed set of values, cycled with ←/→.
  Choice(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum FieldKind {
  Leaf(Leaf),
  /// An array of sub-forms. A sub-field with an empty path edits the entry
  /// itself (arrays of strings).
  Repeatable {
    fields:       Vec<(&'static str, &'static str, Leaf)>,
    default_item: Value,
    max:          Option<usize>,
  },
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
  pub path:  &'static str,
  pub label: &'static str,
  pub kind:  FieldKind,
}

impl FieldSpec {
  pub fn leaf(path: &'static str, label: &'static str, leaf: Leaf) -> Self {
    Self { path, label, kind: FieldKind::Leaf(leaf) }
  }

  pub fn input(path: &'static str, label: &'static str) -> Self { Self::leaf(path, label, Leaf::Input) }

  pub fn text_area(path: &'static str, label: &'static str) -> Self {
    Self::leaf(path, label, Leaf::TextArea)
  }

  pub fn repeatable(
    path: &'static str,
    label: &'static str,
    fields: Vec<(&'static str, &'static str, Leaf)>,
    default_item: Value,
  ) -> Self {
    Self { path, label, kind: FieldKind::Repeatable { fields, default_item, max: None } }
  }
}

// ─── Slots ────────────────────────────────────────────────────────────────────

/// One focusable line of a form, with its full path resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
  pub path:  String,
  pub label: String,
  pub kind:  SlotKind,
  /// Set for fields inside a repeatable entry.
  pub entry: Option<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
  Field(Leaf),
  /// The header line of a repeatable array.
  Array { len: usize, can_add: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub array:      String,
  pub index:      usize,
  /// First field of its entry; the UI draws the entry separator here.
  pub first:      bool,
  pub removable:  bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
  None,
  Submit,
  Back,
  Reverted,
}

// ─── Trait ────────────────────────────────────────────────────────────────────

pub trait Editor: Send {
  fn title(&self) -> &str;
  fn slots(&self) -> Vec<Slot>;
  fn focus(&self) -> usize;
  fn value(&self, path: &str) -> Value;
  fn error(&self, path: &str) -> Option<String>;
  /// Text typed into a tag field but not yet committed.
  fn pending_tag(&self, path: &str) -> Option<&str>;
  fn picker(&self) -> Option<&IconPicker>;
  fn is_dirty(&self) -> bool;
  fn can_submit(&self) -> bool;
  fn is_submitting(&self) -> bool;

  fn resize(&mut self, width: u16, rows: usize);
  fn handle_key(&mut self, key: KeyEvent) -> Result<EditorAction>;
  fn handle_paste(&mut self, text: &str) -> Result<()>;

  /// Snapshot the draft for sending; `None` when submitting is disabled.
  fn begin_submit(&mut self) -> Option<Submission>;
  /// Settle the submission; true on success.
  fn finish_submit(
    &mut self,
    result: Result<(), ClientError>,
    notifier: &std::sync::mpsc::Sender<Notification>,
  ) -> bool;
}

// ─── FormEditor ───────────────────────────────────────────────────────────────

type Wrap<T> = Box<dyn Fn(T) -> Submission + Send>;

pub struct FormEditor<T> {
  title:     String,
  success:   String,
  form:      FormSession<T>,
  specs:     Vec<FieldSpec>,
  arrays:    HashMap<&'static str, FieldArray>,
  tags:      HashMap<String, TagInput>,
  picker:    Option<(String, IconPicker)>,
  focus:     usize,
  viewport:  (u16, usize),
  wrap:      Wrap<T>,
  in_flight: Option<T>,
}

impl<T: Draft + Send + 'static> FormEditor<T> {
  pub fn new(
    title: impl Into<String>,
    defaults: T,
    specs: Vec<FieldSpec>,
    success: impl Into<String>,
    wrap: impl Fn(T) -> Submission + Send + 'static,
  ) -> Result<Self> {
    let mut form = FormSession::new(defaults);
    let mut arrays = HashMap::new();
    for spec in &specs {
      if let FieldKind::Repeatable { default_item, max, .. } = &spec.kind {
        let array = FieldArray::attach(&mut form, spec.path, default_item.clone(), *max)?;
        arrays.insert(spec.path, array);
      }
    }
    // Synthesized entries are part of the starting point, not an edit.
    let start = form.draft().clone();
    form.reset(start);

    Ok(Self {
      title: title.into(),
      success: success.into(),
      form,
      specs,
      arrays,
      tags: HashMap::new(),
      picker: None,
      focus: 0,
      viewport: (80, 4),
      wrap: Box::new(wrap),
      in_flight: None,
    })
  }

  fn realign(&mut self) -> Result<()> {
    for array in self.arrays.values_mut() {
      array.realign(&mut self.form)?;
    }
    Ok(())
  }

  fn focused(&self) -> Option<Slot> { self.slots().into_iter().nth(self.focus) }

  fn move_focus(&mut self, delta: isize) {
    let len = self.slots().len();
    if len == 0 {
      return;
    }
    self.focus = (self.focus as isize + delta).rem_euclid(len as isize) as usize;
  }

  fn clamp_focus(&mut self) {
    let len = self.slots().len();
    self.focus = self.focus.min(len.saturating_sub(1));
  }

  /// The repeatable array the focused slot belongs to, and the entry index
  /// when focus is inside an entry.
  fn focused_array(&self) -> Option<(&'static str, Option<usize>)> {
    let slot = self.focused()?;
    let (array_path, index) = match (&slot.kind, &slot.entry) {
      (SlotKind::Array { .. }, _) => (slot.path.clone(), None),
      (_, Some(entry)) => (entry.array.clone(), Some(entry.index)),
      _ => return None,
    };
    let key = self.arrays.keys().find(|k| **k == array_path)?;
    Some((*key, index))
  }

  fn add_entry(&mut self) -> Result<()> {
    if let Some((key, _)) = self.focused_array()
      && let Some(array) = self.arrays.get_mut(key)
    {
      array.add(&mut self.form)?;
    }
    Ok(())
  }

  fn remove_entry(&mut self) -> Result<()> {
    if let Some((key, Some(index))) = self.focused_array()
      && let Some(array) = self.arrays.get_mut(key)
    {
      array.remove(&mut self.form, index)?;
      self.clamp_focus();
    }
    Ok(())
  }

  fn shift_entry(&mut self, up: bool) -> Result<()> {
    let Some((key, Some(index))) = self.focused_array() else {
      return Ok(());
    };
    let Some(array) = self.arrays.get_mut(key) else {
      return Ok(());
    };
    let target = if up { index.checked_sub(1) } else { Some(index + 1) };
    if let Some(to) = target
      && array.move_entry(&mut self.form, index, to)?
    {
      // Keep focus on the same field of the moved entry.
      let width = self.slots().iter().filter(|s| {
        s.entry.as_ref().is_some_and(|e| e.array == key && e.index == to)
      }).count() as isize;
      self.move_focus(if up { -width } else { width });
    }
    Ok(())
  }

  fn append_text(&mut self, path: &str, text: &str) -> Result<()> {
    let mut value = self.form.text(path)?;
    value.push_str(text);
    self.form.set_field(path, value)?;
    Ok(())
  }

  fn pop_text(&mut self, path: &str) -> Result<()> {
    let mut value = self.form.text(path)?;
    value.pop();
    self.form.set_field(path, value)?;
    Ok(())
  }

  /// Run `edit` against the tag input for `path`, creating it on first use.
  fn with_tag_input<R>(
    &mut self,
    path: &str,
    max: Option<usize>,
    edit: impl FnOnce(&mut TagInput, &mut FormSession<T>) -> folio_core::Result<R>,
  ) -> Result<R> {
    let mut input = match self.tags.remove(path) {
      Some(input) => input,
      None => TagInput::new(path, max)?,
    };
    let result = edit(&mut input, &mut self.form);
    self.tags.insert(path.to_owned(), input);
    Ok(result?)
  }

  fn open_picker(&mut self, path: &str) -> Result<()> {
    let current = self.form.text(path)?;
    let mut picker = IconPicker::new(&current).with_breakpoint(ICON_GRID_BREAKPOINT);
    picker.open();
    picker.set_viewport(self.viewport.0, self.viewport.1);
    self.picker = Some((path.to_owned(), picker));
    Ok(())
  }

  fn handle_picker_key(&mut self, key: KeyEvent) -> Result<EditorAction> {
    let Some((path, picker)) = self.picker.as_mut() else {
      return Ok(EditorAction::None);
    };
    match key.code {
      KeyCode::Esc => picker.close(),
      KeyCode::Enter => {
        picker.commit(&mut self.form, path)?;
      }
      KeyCode::Left => picker.move_cursor(-1, 0),
      KeyCode::Right => picker.move_cursor(1, 0),
      KeyCode::Up => picker.move_cursor(0, -1),
      KeyCode::Down => picker.move_cursor(0, 1),
      KeyCode::PageUp => picker.move_cursor(0, -4),
      KeyCode::PageDown => picker.move_cursor(0, 4),
      KeyCode::Backspace => picker.pop_char(),
      KeyCode::Char(c) => picker.push_char(c),
      _ => {}
    }
    if !picker.is_open() {
      self.picker = None;
    }
    Ok(EditorAction::None)
  }

  fn edit_leaf(&mut self, path: &str, leaf: &Leaf, key: KeyEvent) -> Result<()> {
    match (leaf, key.code) {
      (Leaf::Tags { max }, code) => {
        let tag_key = match code {
          KeyCode::Enter => TagKey::Enter,
          KeyCode::Char(',') => TagKey::Comma,
          KeyCode::Backspace => TagKey::Backspace,
          KeyCode::Char(c) => TagKey::Char(c),
          _ => return Ok(()),
        };
        self.with_tag_input(path, *max, |input, form| input.handle_key(form, tag_key))?;
      }
      (Leaf::Switch, KeyCode::Char(' ') | KeyCode::Enter) => {
        let on = self.form.field(path)?.as_bool().unwrap_or(false);
        self.form.set_field(path, !on)?;
      }
      (Leaf::Icon, KeyCode::Char(' ') | KeyCode::Enter) => self.open_picker(path)?,
      (Leaf::Choice(options), KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
        if options.is_empty() {
          return Ok(());
        }
        let current = self.form.text(path)?;
        let at = options.iter().position(|o| *o == current);
        let next = match (at, key.code) {
          (None, _) => 0,
          (Some(i), KeyCode::Left) => (i + options.len() - 1) % options.len(),
          (Some(i), _) => (i + 1) % options.len(),
        };
        self.form.set_field(path, options[next].clone())?;
      }
      (Leaf::TextArea, KeyCode::Enter) => self.append_text(path, "\n")?,
      (Leaf::Input | Leaf::Secret | Leaf::File | Leaf::TextArea, KeyCode::Char(c)) => {
        self.append_text(path, c.encode_utf8(&mut [0; 4]))?;
      }
      (Leaf::Input | Leaf::Secret | Leaf::File | Leaf::TextArea, KeyCode::Backspace) => {
        self.pop_text(path)?;
      }
      (_, KeyCode::Enter) => self.move_focus(1),
      _ => {}
    }
    Ok(())
  }
}

impl<T: Draft + Send + 'static> Editor for FormEditor<T> {
  fn title(&self) -> &str { &self.title }

  fn slots(&self) -> Vec<Slot> {
    let mut out = Vec::new();
    for spec in &self.specs {
      match &spec.kind {
        FieldKind::Leaf(leaf) => out.push(Slot {
          path:  spec.path.to_owned(),
          label: spec.label.to_owned(),
          kind:  SlotKind::Field(leaf.clone()),
          entry: None,
        }),
        FieldKind::Repeatable { fields, .. } => {
          let Some(array) = self.arrays.get(spec.path) else {
            continue;
          };
          out.push(Slot {
            path:  spec.path.to_owned(),
            label: spec.label.to_owned(),
            kind:  SlotKind::Array { len: array.len(), can_add: array.can_add() },
            entry: None,
          });
          for index in 0..array.len() {
            for (n, (sub, label, leaf)) in fields.iter().enumerate() {
              let entry_path = array.entry_path(index);
              let path = if sub.is_empty() {
                entry_path.to_string()
              } else {
                entry_path.child(sub).to_string()
              };
              out.push(Slot {
                path,
                label: (*label).to_owned(),
                kind: SlotKind::Field(leaf.clone()),
                entry: Some(Entry {
                  array: spec.path.to_owned(),
                  index,
                  first: n == 0,
                  removable: array.can_remove(),
                }),
              });
            }
          }
        }
      }
    }
    out
  }

  fn focus(&self) -> usize { self.focus }

  fn value(&self, path: &str) -> Value { self.form.field(path).unwrap_or(Value::Null) }

  fn error(&self, path: &str) -> Option<String> { self.form.error(path).map(str::to_owned) }

  fn pending_tag(&self, path: &str) -> Option<&str> {
    self.tags.get(path).map(TagInput::pending)
  }

  fn picker(&self) -> Option<&IconPicker> { self.picker.as_ref().map(|(_, p)| p) }

  fn is_dirty(&self) -> bool { self.form.is_dirty() }

  fn can_submit(&self) -> bool { self.form.can_submit() }

  fn is_submitting(&self) -> bool { self.form.is_submitting() }

  fn resize(&mut self, width: u16, rows: usize) {
    self.viewport = (width, rows);
    if let Some((_, picker)) = self.picker.as_mut() {
      picker.set_viewport(width, rows);
    }
  }

  fn handle_key(&mut self, key: KeyEvent) -> Result<EditorAction> {
    if self.picker.is_some() {
      return self.handle_picker_key(key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
      KeyCode::Char('s') if ctrl => return Ok(EditorAction::Submit),
      KeyCode::Char('r') if ctrl => {
        self.form.revert();
        self.realign()?;
        self.tags.clear();
        self.clamp_focus();
        return Ok(EditorAction::Reverted);
      }
      KeyCode::Char('n') if ctrl => self.add_entry()?,
      KeyCode::Char('d') if ctrl => self.remove_entry()?,
      KeyCode::Up if alt => self.shift_entry(true)?,
      KeyCode::Down if alt => self.shift_entry(false)?,
      KeyCode::Esc => return Ok(EditorAction::Back),
      KeyCode::Tab | KeyCode::Down => self.move_focus(1),
      KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
      _ => match self.focused() {
        Some(Slot { kind: SlotKind::Array { .. }, .. }) if key.code == KeyCode::Enter => {
          self.add_entry()?;
        }
        Some(Slot { path, kind: SlotKind::Field(leaf), .. }) => self.edit_leaf(&path, &leaf, key)?,
        _ => {}
      },
    }
    Ok(EditorAction::None)
  }

  fn handle_paste(&mut self, text: &str) -> Result<()> {
    if let Some((_, picker)) = self.picker.as_mut() {
      let search = format!("{}{}", picker.search(), text.trim());
      picker.set_search(&search);
      return Ok(());
    }
    let Some(Slot { path, kind: SlotKind::Field(leaf), .. }) = self.focused() else {
      return Ok(());
    };
    match leaf {
      Leaf::Tags { max } => {
        self.with_tag_input(&path, max, |input, form| input.paste(form, text))?;
      }
      Leaf::TextArea => self.append_text(&path, text)?,
      Leaf::Input | Leaf::Secret | Leaf::File => {
        let line = text.lines().next().unwrap_or_default().to_owned();
        self.append_text(&path, &line)?;
      }
      _ => {}
    }
    Ok(())
  }

  fn begin_submit(&mut self) -> Option<Submission> {
    let values = self.form.begin_submit()?;
    self.in_flight = Some(values.clone());
    Some((self.wrap)(values))
  }

  fn finish_submit(
    &mut self,
    result: Result<(), ClientError>,
    notifier: &std::sync::mpsc::Sender<Notification>,
  ) -> bool {
    let Some(values) = self.in_flight.take() else {
      return false;
    };
    let ok = self.form.finish_submit(values, result, notifier, &self.success).is_some();
    if ok && let Err(e) = self.realign() {
      tracing::warn!("realigning arrays after submit: {e}");
    }
    ok
  }
}
