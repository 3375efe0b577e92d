//! Route definitions for the `/days` resource and its nested categories and notes.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{categories, days, notes};
use crate::state::AppState;

/// Routes mounted at `/days`.
///
/// ```text
/// GET    /{date}                                       -> get_day
/// GET    /{date}/categories                            -> list_categories
/// POST   /{date}/categories                            -> create_category
/// POST   /{date}/categories/seed                       -> seed_categories
/// PUT    /{date}/categories/{id}                       -> update_category
/// DELETE /{date}/categories/{id}                       -> delete_category
/// POST   /{date}/categories/{id}/suggestions           -> suggest_for_category
/// GET    /{date}/categories/{id}/notes                 -> list_notes
/// POST   /{date}/categories/{id}/notes                 -> create_note
/// PUT    /{date}/categories/{id}/notes/{note_id}       -> update_note
/// DELETE /{date}/categories/{id}/notes/{note_id}       -> delete_note
/// PATCH  /{date}/categories/{id}/notes/{note_id}/favorite -> set_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{date}", get(days::get_day))
        .route(
            "/{date}/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/{date}/categories/seed", post(categories::seed_categories))
        .route(
            "/{date}/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/{date}/categories/{id}/suggestions",
            post(categories::suggest_for_category),
        )
        .route(
            "/{date}/categories/{id}/notes",
            get(notes::list_notes).post(notes::create_note),
        )
        .route(
            "/{date}/categories/{id}/notes/{note_id}",
            put(notes::update_note).delete(notes::delete_note),
        )
        .route(
            "/{date}/categories/{id}/notes/{note_id}/favorite",
            patch(notes::set_favorite),
        )
}
