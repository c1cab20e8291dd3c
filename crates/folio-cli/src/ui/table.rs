//! List pages: a data table with a paging footer.

use folio_forms::{DataTable, SortDirection, TableBody, TableRow};
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::app::Prompt;

pub fn draw<R: TableRow>(
  f: &mut Frame,
  area: Rect,
  title: &str,
  table: &DataTable<R>,
  prompt: Option<&Prompt>,
) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let parts = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  let columns = table.columns();
  let sort = table.sort_state();
  let header = Row::new(columns.iter().enumerate().map(|(i, c)| {
    let arrow = match sort {
      Some((s, SortDirection::Ascending)) if s == i => " ▲",
      Some((s, SortDirection::Descending)) if s == i => " ▼",
      _ => "",
    };
    let number = if c.sortable { format!("{} ", i + 1) } else { String::new() };
    format!("{number}{}{arrow}", c.label)
  }))
  .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

  let widths = vec![Constraint::Ratio(1, columns.len().max(1) as u32); columns.len()];

  match table.body() {
    TableBody::Rows(rows) => {
      let rows: Vec<Row> = rows
        .iter()
        .map(|row| Row::new(columns.iter().map(|c| row.cell(&c.key))))
        .collect();
      let mut state = TableState::default().with_selected(Some(table.cursor()));
      f.render_stateful_widget(
        Table::new(rows, widths)
          .header(header)
          .row_highlight_style(
            Style::default()
              .bg(Color::Blue)
              .fg(Color::White)
              .add_modifier(Modifier::BOLD),
          ),
        parts[0],
        &mut state,
      );
    }
    TableBody::Empty { message, .. } => {
      let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(parts[0]);
      f.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), split[0]);
      f.render_widget(
        Paragraph::new(message)
          .alignment(Alignment::Center)
          .style(Style::default().fg(Color::DarkGray)),
        split[1],
      );
    }
  }

  draw_footer(f, parts[1], table, prompt);
}

fn draw_footer<R: TableRow>(f: &mut Frame, area: Rect, table: &DataTable<R>, prompt: Option<&Prompt>) {
  let mut spans = vec![Span::raw(format!("{}  ", table.status()))];
  for page in table.page_window() {
    let style = if page == table.current_page() {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!(" {page} "), style));
  }

  let filtering = matches!(prompt, Some(Prompt::Filter(_)));
  if filtering || !table.filter().is_empty() {
    let cursor = if filtering { "_" } else { "" };
    spans.push(Span::styled(
      format!("   /{}{cursor}", table.filter()),
      Style::default().fg(Color::Yellow),
    ));
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}
