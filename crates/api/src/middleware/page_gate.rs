//! Route-level gate for page requests.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use daybook_core::auth_gate::{decide, GateDecision};
use daybook_core::dates::Day;

use crate::middleware::auth::resolve_session;
use crate::state::AppState;

/// Redirect page requests according to the session, or let them through.
pub async fn page_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let session = resolve_session(request.headers(), &state.config.jwt);
    let path = request.uri().path().to_string();

    match decide(&path, session, Day::today()) {
        GateDecision::Redirect(target) => {
            tracing::debug!(%path, %target, signed_in = session.is_signed_in(), "Page gate redirect");
            Redirect::to(&target).into_response()
        }
        GateDecision::Proceed => next.run(request).await,
    }
}
