use axum::extract::State;
use axum::Json;
use daybook_suggest::{SuggestNoteIdeasInput, SuggestNoteIdeasOutput};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/suggestions
///
/// Body: `{category, currentNotes?}`. Returns `{ideas: string[]}`.
pub async fn suggest_note_ideas(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SuggestNoteIdeasInput>,
) -> AppResult<Json<DataResponse<SuggestNoteIdeasOutput>>> {
    tracing::debug!(user_id = auth.user_id, category = %input.category, "Suggestion requested");
    let output = state.suggestions.suggest_note_ideas(&input).await?;
    Ok(Json(DataResponse { data: output }))
}
