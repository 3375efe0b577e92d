//! Routing rules for date-keyed pages.
//!
//! Signed-out visitors may only see the login and sign-up surfaces; signed-in
//! users never see them and land on today's page instead.

use crate::dates::Day;
use crate::types::DbId;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";

/// Session state resolved for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn { user_id: DbId },
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }
}

/// What the gate does with a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect(String),
}

/// Page path for a day, e.g. `/2024-04-29`.
pub fn day_path(day: Day) -> String {
    format!("/{day}")
}

/// Whether `path` is the login or sign-up surface (or below them).
pub fn is_auth_page(path: &str) -> bool {
    path.starts_with(LOGIN_PATH) || path.starts_with(SIGNUP_PATH)
}

/// Decide whether a page request proceeds or is redirected.
pub fn decide(path: &str, session: SessionState, today: Day) -> GateDecision {
    let signed_in = session.is_signed_in();

    if path == "/" {
        let target = if signed_in {
            day_path(today)
        } else {
            LOGIN_PATH.to_string()
        };
        return GateDecision::Redirect(target);
    }

    match (signed_in, is_auth_page(path)) {
        (false, false) => GateDecision::Redirect(LOGIN_PATH.to_string()),
        (true, true) => GateDecision::Redirect(day_path(today)),
        _ => GateDecision::Proceed,
    }
}
