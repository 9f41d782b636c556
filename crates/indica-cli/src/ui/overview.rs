//! Referral link card, its QR code overlay, and the four stat cards.

use indica_core::{
  dashboard::Dashboard,
  earnings::RECURRING_RATE,
  format::{format_brl, format_percentage},
  summary::ReferralSummary,
};
use qrcode::{QrCode, render::unicode::Dense1x2};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

pub fn draw_link(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
  let block = Block::default()
    .title(format!(" Referral link · {} ", dashboard.consultant.referral_code))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Span::styled(
      dashboard.referral_link.as_str(),
      Style::default().fg(Color::Yellow),
    )),
    inner,
  );
}

// ─── QR code ──────────────────────────────────────────────────────────────────

/// The referral link as a QR code in half-block characters, quiet zone
/// included. `None` if the link is too long to encode.
pub fn qr_text(link: &str) -> Option<String> {
  let code = QrCode::new(link.as_bytes()).ok()?;
  Some(
    code
      .render::<Dense1x2>()
      .dark_color(Dense1x2::Light)
      .light_color(Dense1x2::Dark)
      .build(),
  )
}

/// Overlay the QR code for the referral link, centred in `area`.
pub fn draw_qr(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
  let text = qr_text(&dashboard.referral_link)
    .unwrap_or_else(|| "Link too long for a QR code.".to_string());
  let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
  let height = text.lines().count() as u16 + 2;

  if width > area.width || height > area.height {
    let popup = centred(area, area.width.min(40), 3);
    f.render_widget(Clear, popup);
    f.render_widget(
      Paragraph::new("Terminal too small for the QR code.")
        .block(Block::default().borders(Borders::ALL)),
      popup,
    );
    return;
  }

  let popup = centred(area, width, height);
  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(text).block(
      Block::default()
        .title(format!(" {} ", dashboard.consultant.referral_code))
        .borders(Borders::ALL),
    ),
    popup,
  );
}

fn centred(area: Rect, width: u16, height: u16) -> Rect {
  Rect {
    x: area.x + area.width.saturating_sub(width) / 2,
    y: area.y + area.height.saturating_sub(height) / 2,
    width: width.min(area.width),
    height: height.min(area.height),
  }
}

// ─── Stats ────────────────────────────────────────────────────────────────────

pub fn draw_stats(f: &mut Frame, area: Rect, summary: &ReferralSummary) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(area);

  let cards = stat_cards(summary);
  for (card, col) in cards.iter().zip(cols.iter()) {
    draw_card(f, *col, card);
  }
}

/// Title, headline figure and caption for one stat card.
pub struct StatCard {
  pub title:   &'static str,
  pub value:   String,
  pub caption: String,
}

pub fn stat_cards(summary: &ReferralSummary) -> [StatCard; 4] {
  [
    StatCard {
      title:   "Referrals",
      value:   summary.total_referrals.to_string(),
      caption: format!("+{} this month", summary.this_month_referrals),
    },
    StatCard {
      title:   "Active contracts",
      value:   summary.active_contracts.to_string(),
      caption: format!("{} conversion", format_percentage(summary.conversion_rate)),
    },
    StatCard {
      title:   "Recurring earnings",
      value:   format_brl(summary.total_earnings),
      caption: format!(
        "{} of active balances",
        format_percentage(RECURRING_RATE * 100.0)
      ),
    },
    StatCard {
      title:   "Link clicks",
      value:   summary.total_clicks.to_string(),
      caption: "estimated".to_string(),
    },
  ]
}

fn draw_card(f: &mut Frame, area: Rect, card: &StatCard) {
  let block = Block::default()
    .title(format!(" {} ", card.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    Line::from(Span::styled(
      card.value.clone(),
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      card.caption.clone(),
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
