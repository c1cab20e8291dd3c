//! Icon picker modal.

use folio_forms::IconPicker;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered;

pub fn draw(f: &mut Frame, area: Rect, picker: &IconPicker) {
  let rect = centered(area, area.width.saturating_sub(8), area.height.saturating_sub(4));
  let block = Block::default()
    .title(format!(" Select Icon ({} matches) ", picker.matches().len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(rect);
  f.render_widget(Clear, rect);
  f.render_widget(block, rect);
  if inner.height < 3 {
    return;
  }

  let search = Line::from(vec![
    Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
    Span::raw(format!("{}_", picker.search())),
  ]);
  f.render_widget(Paragraph::new(search), Rect { height: 1, ..inner });

  let grid = Rect { y: inner.y + 2, height: inner.height - 2, ..inner };
  let cells = picker.visible_cells();
  if cells.is_empty() {
    f.render_widget(
      Paragraph::new("No icons found.").style(Style::default().fg(Color::DarkGray)),
      grid,
    );
    return;
  }

  let cell_width = grid.width / picker.columns() as u16;
  for cell in cells {
    let y = grid.y + cell.row as u16;
    if y >= grid.y + grid.height {
      break;
    }
    let rect = Rect { x: grid.x + cell.column as u16 * cell_width, y, width: cell_width, height: 1 };
    let name = cell.name.strip_prefix("tabler:").unwrap_or(cell.name);
    let style = if cell.focused {
      Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else if cell.disabled {
      Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
      Style::default()
    };
    f.render_widget(Paragraph::new(Span::styled(name, style)), rect);
  }
}
