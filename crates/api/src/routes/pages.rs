//! Route definitions for the date-keyed pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes, mounted at the root and wrapped by the page gate.
///
/// ```text
/// GET /         -> redirect to /{today} or /login
/// GET /login    -> login page model
/// GET /signup   -> sign-up page model
/// GET /{date}   -> day page model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/login", get(pages::login_page))
        .route("/signup", get(pages::signup_page))
        .route("/{date}", get(pages::day_page))
}
