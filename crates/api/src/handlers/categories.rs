//! Handlers for the `/days/{date}/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use daybook_core::error::CoreError;
use daybook_core::notes::{validate_category_name, validate_icon, DEFAULT_ICON};
use daybook_core::types::{now_millis, DbId};
use daybook_db::models::category::{Category, CreateCategory, UpdateCategory};
use daybook_db::repositories::{CategoryRepo, NoteRepo};
use daybook_suggest::{SuggestNoteIdeasInput, SuggestNoteIdeasOutput};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::day_scope;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the seed endpoint.
#[derive(Debug, Serialize)]
pub struct SeedResult {
    /// Whether the predefined set was inserted by this call.
    pub seeded: bool,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Category",
        id,
    }
}

/// GET /api/v1/days/{date}/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(date): AppPath<String>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let scope = day_scope(&auth, &date)?;
    let categories = CategoryRepo::list(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/days/{date}/categories
///
/// The name is trimmed; a missing icon gets the default.
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(date): AppPath<String>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let scope = day_scope(&auth, &date)?;

    validate_category_name(&input.name).map_err(CoreError::Validation)?;
    let icon = match input.icon.as_deref() {
        Some(icon) => {
            validate_icon(icon).map_err(CoreError::Validation)?;
            icon.trim()
        }
        None => DEFAULT_ICON,
    };

    let category =
        CategoryRepo::create(&state.pool, scope, input.name.trim(), icon, now_millis()).await?;
    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        category_id = category.id,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// POST /api/v1/days/{date}/categories/seed
pub async fn seed_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(date): AppPath<String>,
) -> AppResult<Json<DataResponse<SeedResult>>> {
    let scope = day_scope(&auth, &date)?;
    let seeded = CategoryRepo::seed_predefined_if_needed(&state.pool, scope, now_millis()).await?;
    if seeded {
        tracing::info!(user_id = scope.user_id, day = %scope.day, "Seeded predefined categories");
    }
    Ok(Json(DataResponse {
        data: SeedResult { seeded },
    }))
}

/// PUT /api/v1/days/{date}/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let scope = day_scope(&auth, &date)?;

    if let Some(name) = &input.name {
        validate_category_name(name).map_err(CoreError::Validation)?;
    }
    if let Some(icon) = &input.icon {
        validate_icon(icon).map_err(CoreError::Validation)?;
    }
    let input = UpdateCategory {
        name: input.name.map(|n| n.trim().to_string()),
        icon: input.icon.map(|i| i.trim().to_string()),
    };

    let category = CategoryRepo::update(&state.pool, scope, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = scope.user_id, day = %scope.day, category_id = id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/days/{date}/categories/{id}
///
/// Removes the category and all of its notes atomically.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, id)): AppPath<(String, DbId)>,
) -> AppResult<StatusCode> {
    let scope = day_scope(&auth, &date)?;
    let notes_deleted = CategoryRepo::delete_cascade(&state.pool, scope, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        user_id = scope.user_id,
        day = %scope.day,
        category_id = id,
        notes_deleted,
        "Category deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/days/{date}/categories/{id}/suggestions
///
/// Ask for ideas using the category's name and its current notes joined by
/// `", "`.
pub async fn suggest_for_category(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((date, id)): AppPath<(String, DbId)>,
) -> AppResult<Json<DataResponse<SuggestNoteIdeasOutput>>> {
    let scope = day_scope(&auth, &date)?;
    let category = CategoryRepo::find_by_id(&state.pool, scope, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let notes = NoteRepo::list(&state.pool, scope, id).await?;
    let current_notes = (!notes.is_empty()).then(|| {
        notes
            .iter()
            .map(|n| n.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    });

    let input = SuggestNoteIdeasInput {
        category: category.name,
        current_notes,
    };
    let output = state.suggestions.suggest_note_ideas(&input).await?;
    Ok(Json(DataResponse { data: output }))
}
