//! Referral table: one row per referred client.

use indica_core::{dashboard::ReferralRow, format::format_brl, profile::ContractStatus};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::App;

/// Render the filtered referral table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_rows();
  let total = app.dashboard().map_or(0, |d| d.referrals.len());

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Referrals ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Referrals ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if total == 0 {
    f.render_widget(
      Paragraph::new(Span::styled(
        "No referrals yet. Share your link to get started.",
        Style::default().fg(Color::DarkGray),
      )),
      inner_area,
    );
    return;
  }

  let header = Row::new(["Name", "Phone", "Balance", "Status", "Earning", "Since"])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = filtered.iter().map(|r| table_row(r)).collect();

  let widths = [
    Constraint::Min(16),
    Constraint::Length(16),
    Constraint::Length(16),
    Constraint::Length(10),
    Constraint::Length(14),
    Constraint::Length(10),
  ];

  let mut state = TableState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.cursor)
  });

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner_area,
    &mut state,
  );
}

fn table_row(row: &ReferralRow) -> Row<'static> {
  let status_style = match row.contract_status {
    ContractStatus::Active => Style::default().fg(Color::Green),
    ContractStatus::Cancelled => Style::default().fg(Color::Red),
    _ => Style::default().fg(Color::DarkGray),
  };

  Row::new(vec![
    Cell::from(row.display_name.clone()),
    Cell::from(row.phone.clone().unwrap_or_else(|| "—".to_string())),
    Cell::from(format_brl(row.current_balance)),
    Cell::from(status_label(&row.contract_status)).style(status_style),
    Cell::from(format_brl(row.earning)),
    Cell::from(row.created_at.format("%d/%m/%Y").to_string()),
  ])
}

fn status_label(status: &ContractStatus) -> String {
  match status {
    ContractStatus::Active => "active".to_string(),
    ContractStatus::Inactive => "inactive".to_string(),
    ContractStatus::Cancelled => "cancelled".to_string(),
    ContractStatus::Unrecognized(raw) if raw.is_empty() => "—".to_string(),
    ContractStatus::Unrecognized(raw) => raw.clone(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_status_shows_raw_value() {
    assert_eq!(status_label(&ContractStatus::parse("pendente")), "pendente");
    assert_eq!(status_label(&ContractStatus::parse("")), "—");
    assert_eq!(status_label(&ContractStatus::parse("ativo")), "active");
  }
}
