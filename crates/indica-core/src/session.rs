//! Dashboard session: which consultant is signed in, and the dashboard
//! currently shown for them.
//!
//! Identity changes invalidate the cached dashboard. Refreshes are split into
//! [`DashboardSession::begin_refresh`], which hands out a [`RefreshTicket`],
//! and [`DashboardSession::complete`], which installs the fetched dashboard
//! only if no identity change or invalidation happened in between. A refresh
//! whose ticket went stale is simply discarded; dropping an in-flight fetch
//! needs no cleanup.

use uuid::Uuid;

use crate::dashboard::Dashboard;

/// Proof that a refresh was requested for a given identity and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
  consultant_id: Uuid,
  generation:    u64,
}

impl RefreshTicket {
  /// The consultant whose dashboard should be fetched.
  pub fn consultant_id(&self) -> Uuid { self.consultant_id }
}

/// Session state for one dashboard view.
#[derive(Debug, Default)]
pub struct DashboardSession {
  identity:   Option<Uuid>,
  generation: u64,
  dashboard:  Option<Dashboard>,
}

impl DashboardSession {
  pub fn new() -> Self { Self::default() }

  /// The signed-in consultant, if any.
  pub fn identity(&self) -> Option<Uuid> { self.identity }

  /// The last dashboard installed for the current identity.
  pub fn dashboard(&self) -> Option<&Dashboard> { self.dashboard.as_ref() }

  /// Switch to `identity` (or sign out with `None`).
  ///
  /// Setting the identity that is already active is a no-op. Returns `true`
  /// when the identity changed and a refresh is due.
  pub fn set_identity(&mut self, identity: Option<Uuid>) -> bool {
    if self.identity == identity {
      return false;
    }
    self.identity = identity;
    self.invalidate();
    identity.is_some()
  }

  /// Drop the cached dashboard and make every outstanding ticket stale.
  pub fn invalidate(&mut self) {
    self.generation += 1;
    self.dashboard = None;
  }

  /// Start a refresh for the current identity; `None` when signed out.
  ///
  /// Asking twice without an intervening change yields equal tickets, so a
  /// repeated refresh is harmless.
  pub fn begin_refresh(&self) -> Option<RefreshTicket> {
    self.identity.map(|consultant_id| RefreshTicket {
      consultant_id,
      generation: self.generation,
    })
  }

  /// Install `dashboard` if `ticket` is still current. Returns whether the
  /// dashboard was installed.
  pub fn complete(&mut self, ticket: RefreshTicket, dashboard: Dashboard) -> bool {
    if !self.is_current(&ticket) || dashboard.consultant.id != ticket.consultant_id {
      return false;
    }
    self.dashboard = Some(dashboard);
    true
  }

  /// Whether `ticket` still matches the session's identity and generation.
  pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
    self.identity == Some(ticket.consultant_id) && self.generation == ticket.generation
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::profile::{ConsultantProfile, Role};

  fn dashboard_for(id: Uuid) -> Dashboard {
    let consultant = ConsultantProfile {
      id,
      role: Role::Consultant,
      name: None,
      referral_code: "CODE".into(),
    };
    Dashboard::build(consultant, "https://indica.test", &[], &Utc::now())
  }

  #[test]
  fn signed_out_session_has_nothing_to_refresh() {
    let session = DashboardSession::new();
    assert!(session.begin_refresh().is_none());
    assert!(session.dashboard().is_none());
  }

  #[test]
  fn refresh_installs_dashboard() {
    let id = Uuid::new_v4();
    let mut session = DashboardSession::new();
    assert!(session.set_identity(Some(id)));

    let ticket = session.begin_refresh().unwrap();
    assert_eq!(ticket.consultant_id(), id);
    assert!(session.complete(ticket, dashboard_for(id)));
    assert_eq!(session.dashboard().unwrap().consultant.id, id);
  }

  #[test]
  fn setting_same_identity_is_idempotent() {
    let id = Uuid::new_v4();
    let mut session = DashboardSession::new();
    session.set_identity(Some(id));
    let ticket = session.begin_refresh().unwrap();
    session.complete(ticket, dashboard_for(id));

    assert!(!session.set_identity(Some(id)));
    assert!(session.dashboard().is_some());
    assert_eq!(session.begin_refresh(), Some(ticket));
  }

  #[test]
  fn identity_change_discards_in_flight_refresh() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let mut session = DashboardSession::new();
    session.set_identity(Some(first));
    let stale = session.begin_refresh().unwrap();

    session.set_identity(Some(second));
    assert!(!session.complete(stale, dashboard_for(first)));
    assert!(session.dashboard().is_none());
  }

  #[test]
  fn sign_out_clears_dashboard() {
    let id = Uuid::new_v4();
    let mut session = DashboardSession::new();
    session.set_identity(Some(id));
    let ticket = session.begin_refresh().unwrap();
    session.complete(ticket, dashboard_for(id));

    assert!(!session.set_identity(None));
    assert!(session.dashboard().is_none());
    assert!(session.begin_refresh().is_none());
  }

  #[test]
  fn invalidate_makes_tickets_stale() {
    let id = Uuid::new_v4();
    let mut session = DashboardSession::new();
    session.set_identity(Some(id));
    let ticket = session.begin_refresh().unwrap();

    session.invalidate();
    assert!(!session.is_current(&ticket));
    assert!(!session.complete(ticket, dashboard_for(id)));
  }
}
