//! TUI rendering: orchestrates all panes.

pub mod dashboard;
pub mod form;
pub mod icon_picker;
pub mod table;

use chrono::Local;
use folio_client::Transport;
use folio_core::notify::Level;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use crate::{
  app::{App, Prompt, View},
  route::{Route, Section},
};

const SIDEBAR_WIDTH: u16 = 18;
const TOAST_WIDTH: u16 = 44;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<T: Transport>(f: &mut Frame, app: &App<T>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(row) = &app.confirm_delete {
    draw_confirm(f, area, &row.label());
  }
  if let View::Form { editor, .. } = &app.view
    && let Some(picker) = editor.picker()
  {
    icon_picker::draw(f, area, picker);
  }
  draw_toasts(f, area, app);
}

/// Centre a `width` x `height` box inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let who = app
    .user
    .as_ref()
    .map(|u| if u.name.is_empty() { u.email.clone() } else { u.name.clone() })
    .unwrap_or_default();

  let left = Span::styled(
    " folio  [Ctrl+G] go to  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{who}  {date} "), Style::default().fg(Color::Gray));

  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  if app.route == Route::Login {
    if let View::Form { editor, .. } = &app.view {
      form::draw(f, centered(area, 60, 14), editor.as_ref());
    }
    return;
  }

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
    .split(area);

  draw_sidebar(f, cols[0], app.route.section());

  match &app.view {
    View::Dashboard(stats) => dashboard::draw(f, cols[1], stats),
    View::List { table, .. } => {
      let title = app.route.section().map(|s| s.to_string()).unwrap_or_default();
      table::draw(f, cols[1], &title, table, app.prompt.as_ref());
    }
    View::Form { editor, .. } => form::draw(f, cols[1], editor.as_ref()),
    View::Failed { title, message } => draw_failed(f, cols[1], title, message),
  }
}

fn draw_sidebar(f: &mut Frame, area: Rect, current: Option<Section>) {
  let block = Block::default()
    .title(" Sections ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = Section::iter()
    .enumerate()
    .map(|(i, section)| {
      let style = if Some(section) == current {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(section.to_string(), style),
      ]))
    })
    .collect();

  f.render_widget(List::new(items).block(block), area);
}

fn draw_failed(f: &mut Frame, area: Rect, title: &str, message: &str) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(Span::styled(message.to_owned(), Style::default().fg(Color::Red))),
    Line::from(""),
    Line::from(Span::styled("Press r to retry.", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Paragraph::new(text).block(block), area);
}

// ─── Overlays ─────────────────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, what: &str) {
  let rect = centered(area, 50, 5);
  let block = Block::default()
    .title(" Confirm delete ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(format!("Delete {what}?")),
    Line::from(Span::styled("[y] delete   any other key cancels", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Clear, rect);
  f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), rect);
}

fn draw_toasts<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let width = TOAST_WIDTH.min(area.width);
  let mut y = area.y + 1;
  for toast in app.toasts.iter().rev() {
    if y + 3 > area.y + area.height {
      break;
    }
    let colour = match toast.notification.level {
      Level::Success => Color::Green,
      Level::Info => Color::Cyan,
      Level::Error => Color::Red,
    };
    let rect = Rect { x: area.x + area.width - width, y, width, height: 3 };
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(colour));
    f.render_widget(Clear, rect);
    f.render_widget(
      Paragraph::new(toast.notification.message.as_str())
        .style(Style::default().fg(colour))
        .block(block),
      rect,
    );
    y += 3;
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let (mode_label, hints): (&str, String) = match (&app.prompt, &app.view) {
    _ if app.confirm_delete.is_some() => ("CONFIRM", "y delete  any other key cancels".into()),
    (Some(Prompt::Filter(q)), _) => ("SEARCH", format!("/{q}_   Enter keep  Esc clear")),
    (Some(Prompt::Goto(q)), _) => ("GOTO", format!("{q}_   section name or /path  Enter go  Esc cancel")),
    (None, View::Form { editor, .. }) if editor.picker().is_some() => (
      "ICON",
      "type to search  ←↑↓→ move  Enter select  Esc close".into(),
    ),
    (None, View::Form { .. }) if app.route == Route::Education => (
      "FORM",
      "Ctrl+S save  Ctrl+R reset  Ctrl+N/Ctrl+D add/remove  F2 achievement  F3 subject  F4 course  Esc back".into(),
    ),
    (None, View::Form { .. }) => (
      "FORM",
      "Tab/↑↓ field  Ctrl+S save  Ctrl+R reset  Ctrl+N/Ctrl+D add/remove  Alt+↑↓ move  Esc back".into(),
    ),
    (None, View::List { .. }) => ("LIST", list_hints(&app.route).into()),
    (None, View::Dashboard(_)) => ("HOME", "1-7 section  g go to  r refresh  L sign out  q quit".into()),
    (None, View::Failed { .. }) => ("ERROR", "r retry  Esc dashboard  q quit".into()),
  };

  let status = if app.status_msg.is_empty() { hints } else { app.status_msg.clone() };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn list_hints(route: &Route) -> &'static str {
  match route {
    Route::Experience => "↑↓ move  a add  e edit  d delete  s career summary  1-9 sort  / filter  [ ] page",
    Route::Skills => "↑↓ move  a add  c add category  e edit  d delete  1-9 sort  / filter  [ ] page",
    _ => "↑↓ move  a add  e edit  d delete  1-9 sort  / filter  [ ] page  Esc home",
  }
}
