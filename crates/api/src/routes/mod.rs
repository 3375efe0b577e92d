pub mod auth;
pub mod days;
pub mod health;
pub mod pages;
pub mod suggestions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                       signup (public)
/// /auth/login                                        login (public)
/// /auth/refresh                                      refresh (public)
/// /auth/logout                                       logout (requires auth)
/// /auth/me                                           current user
///
/// /days/{date}                                       day view (?q=)
/// /days/{date}/categories                            list, create
/// /days/{date}/categories/seed                       seed if needed (POST)
/// /days/{date}/categories/{id}                       update, delete
/// /days/{date}/categories/{id}/suggestions           ideas for category (POST)
/// /days/{date}/categories/{id}/notes                 list, create
/// /days/{date}/categories/{id}/notes/{note_id}       update, delete
/// /days/{date}/categories/{id}/notes/{note_id}/favorite   toggle (PATCH)
///
/// /suggestions                                       ideas for {category, currentNotes?}
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/days", days::router())
        .merge(suggestions::router())
}
