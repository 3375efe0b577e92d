use axum::routing::post;
use axum::Router;

use crate::handlers::suggestions;
use crate::state::AppState;

/// Route for free-form idea requests.
///
/// ```text
/// POST /suggestions  -> suggest_note_ideas (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", post(suggestions::suggest_note_ideas))
}
