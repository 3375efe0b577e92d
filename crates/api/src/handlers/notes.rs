//! Handlers for the `/days/{date}/categories/{id}/notes` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use daybook_core::error::CoreError;
use daybook_core::notes::{normalize_image_url, validate_note_text};
use daybook_core::types::{now_millis, DbId};
use daybook_db::models::note::{CreateNote, NewNote, Note, NotePatch, SetFavorite, UpdateNote};
use daybook_db::models::scope::DayScope;
use daybook_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::day_scope;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

fn note_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

/// GET /api/v1/days/{date}/categories/{id}/notes
///
/// Newest first. A category outside the caller's day, including a deleted
/// one, has no notes and lists as empty.
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, category_id)): AppPath<(String, DbId)>,
) -> AppResult<Json<DataResponse<Vec<Note>>>> {
    let scope = day_scope(&auth, &date)?;
    let notes = NoteRepo::list(&state.pool, scope, category_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/v1/days/{date}/categories/{id}/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, category_id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<CreateNote>,
) -> AppResult<(StatusCode, Json<DataResponse<Note>>)> {
    let scope = day_scope(&auth, &date)?;

    validate_note_text(&input.text).map_err(CoreError::Validation)?;
    let image_url =
        normalize_image_url(input.image_url.as_deref()).map_err(CoreError::Validation)?;

    let new_note = NewNote {
        text: input.text,
        image_url,
        is_favorite: input.is_favorite,
    };
    let note = NoteRepo::create(&state.pool, scope, category_id, &new_note, now_millis())
        .await?
        .ok_or_else(|| category_not_found(category_id))?;

    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        category_id,
        note_id = note.id,
        "Note created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// PUT /api/v1/days/{date}/categories/{id}/notes/{note_id}
///
/// Absent fields keep their value and `updatedAt` is always re-stamped. When
/// `expectedUpdatedAt` is given and no longer current the update is rejected
/// with 409.
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, category_id, note_id)): AppPath<(String, DbId, DbId)>,
    AppJson(input): AppJson<UpdateNote>,
) -> AppResult<Json<DataResponse<Note>>> {
    let scope = day_scope(&auth, &date)?;

    if let Some(text) = &input.text {
        validate_note_text(text).map_err(CoreError::Validation)?;
    }
    let image_url = match input.image_url.as_deref() {
        Some(url) => Some(normalize_image_url(Some(url)).map_err(CoreError::Validation)?),
        None => None,
    };

    let patch = NotePatch {
        text: input.text,
        image_url,
        is_favorite: input.is_favorite,
        expected_updated_at: input.expected_updated_at,
    };
    let note = apply_patch(&state, scope, category_id, note_id, &patch).await?;

    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        category_id,
        note_id,
        "Note updated"
    );
    Ok(Json(DataResponse { data: note }))
}

/// PATCH /api/v1/days/{date}/categories/{id}/notes/{note_id}/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, category_id, note_id)): AppPath<(String, DbId, DbId)>,
    AppJson(input): AppJson<SetFavorite>,
) -> AppResult<Json<DataResponse<Note>>> {
    let scope = day_scope(&auth, &date)?;
    let patch = NotePatch {
        is_favorite: Some(input.is_favorite),
        ..NotePatch::default()
    };
    let note = apply_patch(&state, scope, category_id, note_id, &patch).await?;

    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        note_id,
        is_favorite = input.is_favorite,
        "Note favorite toggled"
    );
    Ok(Json(DataResponse { data: note }))
}

/// DELETE /api/v1/days/{date}/categories/{id}/notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, category_id, note_id)): AppPath<(String, DbId, DbId)>,
) -> AppResult<StatusCode> {
    let scope = day_scope(&auth, &date)?;
    if !NoteRepo::delete(&state.pool, scope, category_id, note_id).await? {
        return Err(note_not_found(note_id));
    }
    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        category_id,
        note_id,
        "Note deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Write a patch, telling a missing note (404) from a stale token (409).
async fn apply_patch(
    state: &AppState,
    scope: DayScope,
    category_id: DbId,
    note_id: DbId,
    patch: &NotePatch,
) -> AppResult<Note> {
    if let Some(note) =
        NoteRepo::update(&state.pool, scope, category_id, note_id, patch, now_millis()).await?
    {
        return Ok(note);
    }

    match NoteRepo::find_by_id(&state.pool, scope, category_id, note_id).await? {
        Some(current) => {
            tracing::info!(
                note_id,
                expected = ?patch.expected_updated_at,
                actual = current.updated_at,
                "Rejected stale note update"
            );
            Err(AppError::Core(CoreError::Conflict(
                "The note was changed by someone else; reload and try again".into(),
            )))
        }
        None => Err(note_not_found(note_id)),
    }
}
