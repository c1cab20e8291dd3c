//! Dashboard: content counts, recent projects and recent posts.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::DashboardStats;

pub fn draw(f: &mut Frame, area: Rect, stats: &DashboardStats) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(2), Constraint::Length(5), Constraint::Min(0)])
    .split(area);

  f.render_widget(
    Paragraph::new(vec![
      Line::from(Span::styled("Dashboard", Style::default().add_modifier(Modifier::BOLD))),
      Line::from(Span::styled(
        "Welcome to your portfolio dashboard. Manage your content from here.",
        Style::default().fg(Color::DarkGray),
      )),
    ]),
    rows[0],
  );

  let cards = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(rows[1]);

  draw_card(f, cards[0], "Profile", "Your personal information", Some(1));
  draw_card(f, cards[1], "Projects", "Your portfolio projects", stats.projects);
  draw_card(f, cards[2], "Skills", "Your technical skills", stats.skills);
  draw_card(f, cards[3], "Blog Posts", "Your published articles", stats.blog_posts);

  let recent = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 2); 2])
    .split(rows[2]);

  let projects: Vec<Line> = stats
    .recent_projects
    .iter()
    .map(|title| Line::from(format!("• {title}")))
    .collect();
  draw_recent(f, recent[0], "Recent Projects", projects, "No projects yet.");

  let posts: Vec<Line> = stats
    .recent_posts
    .iter()
    .flat_map(|(title, day)| {
      let day = day.map(|d| d.format("%b %-d, %Y").to_string()).unwrap_or_default();
      [
        Line::from(format!("• {title}")),
        Line::from(Span::styled(format!("  {day}"), Style::default().fg(Color::DarkGray))),
      ]
    })
    .collect();
  draw_recent(f, recent[1], "Recent Blog Posts", posts, "No posts yet.");
}

fn draw_recent(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, empty: &str) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let lines = if lines.is_empty() {
    vec![Line::from(Span::styled(empty.to_owned(), Style::default().fg(Color::DarkGray)))]
  } else {
    lines
  };
  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_card(f: &mut Frame, area: Rect, title: &str, description: &str, value: Option<usize>) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let value = value.map_or_else(|| "—".to_owned(), |n| n.to_string());
  let text = vec![
    Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
    Line::from(Span::styled(description.to_owned(), Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Paragraph::new(text).block(block), area);
}
