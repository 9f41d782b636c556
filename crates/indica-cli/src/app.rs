//! Application state and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use indica_core::{
  dashboard::{Dashboard, ReferralRow},
  session::DashboardSession,
};
use uuid::Uuid;

use crate::client::ApiClient;

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Signed-in consultant and the dashboard fetched for them.
  pub session: DashboardSession,

  /// Current fuzzy-filter string over referral names and phones.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* referral table.
  pub cursor: usize,

  /// Whether the referral-link QR code overlay is open.
  pub show_qr: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      session: DashboardSession::new(),
      filter: String::new(),
      filter_active: false,
      cursor: 0,
      show_qr: false,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  pub fn dashboard(&self) -> Option<&Dashboard> { self.session.dashboard() }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Switch the session to `consultant_id` and load their dashboard.
  pub async fn sign_in(&mut self, consultant_id: Uuid) -> anyhow::Result<()> {
    if self.session.set_identity(Some(consultant_id)) {
      self.cursor = 0;
      self.filter.clear();
    }
    self.refresh().await
  }

  /// Forget the signed-in consultant and their dashboard.
  pub fn sign_out(&mut self) {
    self.session.set_identity(None);
    self.cursor = 0;
    self.filter.clear();
    self.show_qr = false;
    self.status_msg = "Signed out.".into();
  }

  /// Re-fetch the dashboard for the current identity.
  pub async fn refresh(&mut self) -> anyhow::Result<()> {
    let Some(ticket) = self.session.begin_refresh() else {
      self.status_msg = "Not signed in.".into();
      return Ok(());
    };

    self.status_msg = "Loading dashboard…".into();
    match self.client.dashboard(ticket.consultant_id()).await {
      Ok(dashboard) => {
        if self.session.complete(ticket, dashboard) {
          self.clamp_cursor();
          self.status_msg = String::new();
        }
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  // ── Filtered table ────────────────────────────────────────────────────────

  /// Referral rows that match the current filter query.
  pub fn filtered_rows(&self) -> Vec<&ReferralRow> {
    let Some(dashboard) = self.dashboard() else {
      return Vec::new();
    };
    if self.filter.is_empty() {
      return dashboard.referrals.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    dashboard
      .referrals
      .iter()
      .filter(|r| {
        matcher.fuzzy_match(&r.display_name, &self.filter).is_some()
          || r
            .phone
            .as_deref()
            .is_some_and(|p| matcher.fuzzy_match(p, &self.filter).is_some())
      })
      .collect()
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_rows().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    if self.show_qr {
      match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Esc | KeyCode::Char('v') => self.show_qr = false,
        _ => {}
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_rows().len();
        if len > 0 && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // A failed refresh is already reported in the status bar.
      KeyCode::Char('r') => {
        let _ = self.refresh().await;
      }

      KeyCode::Char('v') if self.dashboard().is_some() => self.show_qr = true,

      KeyCode::Char('L') => self.sign_out(),

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Esc => {
        self.filter.clear();
        self.cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
    self.cursor = 0;
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use crossterm::event::KeyEventKind;
  use indica_core::profile::{ConsultantProfile, ContractStatus, ReferredProfile, Role};

  use super::*;
  use crate::client::ApiConfig;

  fn app_with_dashboard() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:0".into(),
      username: String::new(),
      password: String::new(),
    })
    .unwrap();
    let mut app = App::new(client);

    let consultant = ConsultantProfile {
      id: Uuid::new_v4(),
      role: Role::Consultant,
      name: Some("Carla".into()),
      referral_code: "CARLA01".into(),
    };
    let referrals: Vec<ReferredProfile> = [("Amanda", "ativo"), ("Bruno", "cancelado"), ("Caio", "ativo")]
      .into_iter()
      .map(|(name, status)| ReferredProfile {
        id: Uuid::new_v4(),
        name: Some(name.into()),
        phone: None,
        current_balance: 100.0,
        contract_status: ContractStatus::parse(status),
        created_at: Utc::now(),
        referred_by: consultant.id,
      })
      .collect();

    app.session.set_identity(Some(consultant.id));
    let ticket = app.session.begin_refresh().unwrap();
    let dashboard = Dashboard::build(consultant, "https://indica.test", &referrals, &Utc::now());
    assert!(app.session.complete(ticket, dashboard));
    app
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: crossterm::event::KeyEventState::NONE,
    }
  }

  #[test]
  fn filter_narrows_rows() {
    let mut app = app_with_dashboard();
    assert_eq!(app.filtered_rows().len(), 3);
    app.filter = "brn".into();
    let rows = app.filtered_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_name, "Bruno");
  }

  #[tokio::test]
  async fn cursor_stays_in_bounds() {
    let mut app = app_with_dashboard();
    for _ in 0..10 {
      app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
    }
    assert_eq!(app.cursor, 2);
    for _ in 0..10 {
      app.handle_key(key(KeyCode::Char('k'))).await.unwrap();
    }
    assert_eq!(app.cursor, 0);
  }

  #[tokio::test]
  async fn typing_in_filter_mode_does_not_quit() {
    let mut app = app_with_dashboard();
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    assert!(app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
    assert_eq!(app.filter, "q");
    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert!(!app.filter_active);
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
  }

  #[tokio::test]
  async fn qr_overlay_toggles_and_swallows_keys() {
    let mut app = app_with_dashboard();
    app.handle_key(key(KeyCode::Char('v'))).await.unwrap();
    assert!(app.show_qr);
    app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
    assert_eq!(app.cursor, 0);
    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert!(!app.show_qr);
  }

  #[tokio::test]
  async fn sign_out_clears_the_session() {
    let mut app = app_with_dashboard();
    app.handle_key(key(KeyCode::Char('L'))).await.unwrap();
    assert!(app.session.identity().is_none());
    assert!(app.dashboard().is_none());
    assert!(app.filtered_rows().is_empty());

    // Nothing to refresh once signed out; no request is made.
    app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
    assert_eq!(app.status_msg, "Not signed in.");

    // The QR overlay needs a dashboard.
    app.handle_key(key(KeyCode::Char('v'))).await.unwrap();
    assert!(!app.show_qr);
  }

  #[test]
  fn no_dashboard_means_no_rows() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:0".into(),
      username: String::new(),
      password: String::new(),
    })
    .unwrap();
    let app = App::new(client);
    assert!(app.filtered_rows().is_empty());
  }
}
