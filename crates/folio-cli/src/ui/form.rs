//! Form pages: one line per field, errors under the field that owns them.

use folio_forms::IconPicker;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use serde_json::Value;

use crate::editor::{Editor, Leaf, Slot, SlotKind};

const LABEL_WIDTH: usize = 18;

pub fn draw(f: &mut Frame, area: Rect, editor: &dyn Editor) {
  let border = if editor.is_dirty() { Color::Yellow } else { Color::DarkGray };
  let block = Block::default()
    .title(format!(" {} ", editor.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let parts = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  let mut lines: Vec<Line> = Vec::new();
  let mut focus_line = 0;
  for (i, slot) in editor.slots().iter().enumerate() {
    let focused = i == editor.focus();
    if focused {
      focus_line = lines.len();
    }
    slot_lines(editor, slot, focused, &mut lines);
  }

  // Keep the focused field on screen.
  let height = usize::from(parts[0].height);
  let scroll = focus_line.saturating_sub(height.saturating_sub(3));
  f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), parts[0]);

  f.render_widget(Paragraph::new(footer(editor)), parts[1]);
}

fn footer(editor: &dyn Editor) -> Line<'static> {
  if editor.is_submitting() {
    return Line::from(Span::styled("Saving…", Style::default().fg(Color::Yellow)));
  }
  let save = if editor.can_submit() {
    Span::styled("[Ctrl+S] Save", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
  } else {
    Span::styled("[Ctrl+S] Save", Style::default().fg(Color::DarkGray))
  };
  let reset = if editor.is_dirty() {
    Span::raw("  [Ctrl+R] Reset")
  } else {
    Span::styled("  [Ctrl+R] Reset", Style::default().fg(Color::DarkGray))
  };
  Line::from(vec![save, reset])
}

fn slot_lines(editor: &dyn Editor, slot: &Slot, focused: bool, out: &mut Vec<Line<'static>>) {
  let indent = if slot.entry.is_some() { "    " } else { "" };

  if let Some(entry) = &slot.entry
    && entry.first
  {
    let remove = if entry.removable { "  [Ctrl+D] remove" } else { "" };
    out.push(Line::from(Span::styled(
      format!("  #{}{remove}", entry.index + 1),
      Style::default().fg(Color::DarkGray),
    )));
  }

  let marker = if focused { "› " } else { "  " };
  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  };
  let label = format!("{marker}{indent}{:<width$}", slot.label, width = LABEL_WIDTH);

  match &slot.kind {
    SlotKind::Array { len, can_add } => {
      let add = if *can_add { "  [Ctrl+N] add" } else { "" };
      out.push(Line::from(vec![
        Span::styled(format!("{marker}{}", slot.label), label_style.add_modifier(Modifier::UNDERLINED)),
        Span::styled(format!(" ({len}){add}"), Style::default().fg(Color::DarkGray)),
      ]));
    }
    SlotKind::Field(leaf) => {
      let value = editor.value(&slot.path);
      let mut rendered = render_value(leaf, &value, editor.pending_tag(&slot.path), focused);
      let first = if rendered.is_empty() { Vec::new() } else { rendered.remove(0) };
      let mut spans = vec![Span::styled(label, label_style)];
      spans.extend(first);
      out.push(Line::from(spans));
      let pad = " ".repeat(2 + indent.len() + LABEL_WIDTH);
      for continuation in rendered {
        let mut spans = vec![Span::raw(pad.clone())];
        spans.extend(continuation);
        out.push(Line::from(spans));
      }
    }
  }

  if let Some(error) = editor.error(&slot.path) {
    out.push(Line::from(Span::styled(
      format!("  {indent}{:width$}{error}", "", width = LABEL_WIDTH),
      Style::default().fg(Color::Red),
    )));
  }
}

/// Display spans for a field value, one `Vec` per screen line.
fn render_value(leaf: &Leaf, value: &Value, pending: Option<&str>, focused: bool) -> Vec<Vec<Span<'static>>> {
  let text = value.as_str().unwrap_or_default().to_owned();
  let cursor = if focused { "_" } else { "" };
  let dim = Style::default().fg(Color::DarkGray);

  match leaf {
    Leaf::Input | Leaf::File => vec![vec![Span::raw(format!("{text}{cursor}"))]],
    Leaf::Secret => vec![vec![Span::raw(format!("{}{cursor}", "•".repeat(text.chars().count())))]],
    Leaf::TextArea => {
      let mut lines: Vec<Vec<Span>> =
        text.split('\n').map(|l| vec![Span::raw(l.to_owned())]).collect();
      if let Some(last) = lines.last_mut() {
        last.push(Span::raw(cursor));
      }
      lines
    }
    Leaf::Switch => {
      let on = value.as_bool().unwrap_or(false);
      vec![vec![Span::raw(if on { "[x]" } else { "[ ]" })]]
    }
    Leaf::Icon => {
      let trigger = IconPicker::new(&text).trigger_label();
      let shown = if text.is_empty() { Span::styled("(none)", dim) } else { Span::raw(text) };
      vec![vec![shown, Span::styled(format!("  [Enter] {trigger}"), dim)]]
    }
    Leaf::Choice(options) => {
      let shown = if text.is_empty() { "(choose)".to_owned() } else { text };
      let hint = if options.is_empty() { "  no options" } else { "  ←/→ change" };
      vec![vec![Span::raw(format!("‹ {shown} ›")), Span::styled(hint, dim)]]
    }
    Leaf::Tags { max } => {
      let tags: Vec<&str> = value
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
      let mut spans: Vec<Span> = tags
        .iter()
        .map(|t| Span::styled(format!("[{t}] "), Style::default().fg(Color::Cyan)))
        .collect();
      spans.push(Span::raw(format!("{}{cursor}", pending.unwrap_or_default())));
      if let Some(max) = max {
        spans.push(Span::styled(format!("  {}/{max}", tags.len()), dim));
      }
      vec![spans]
    }
  }
}
