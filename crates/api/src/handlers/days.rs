//! The day view: a date's categories with navigation and search.

use axum::extract::State;
use axum::Json;
use daybook_core::dates::Day;
use daybook_core::search::DayFilter;
use daybook_core::types::now_millis;
use daybook_db::models::category::Category;
use daybook_db::models::scope::DayScope;
use daybook_db::repositories::{CategoryRepo, NoteRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::handlers::day_scope;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the day view.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    /// Search term over category names and note text.
    pub q: Option<String>,
}

/// Everything a day page renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: Day,
    /// Long form of the date, e.g. "April 29th, 2024".
    pub label: String,
    pub previous: Option<Day>,
    pub next: Option<Day>,
    /// The active search term, if any.
    pub search: Option<String>,
    pub categories: Vec<Category>,
}

/// Seed the day if it was never opened, then load and filter its categories.
pub(crate) async fn load_day_view(
    state: &AppState,
    scope: DayScope,
    query: Option<&str>,
) -> AppResult<DayView> {
    if CategoryRepo::seed_predefined_if_needed(&state.pool, scope, now_millis()).await? {
        tracing::info!(user_id = scope.user_id, day = %scope.day, "Seeded predefined categories");
    }

    let filter = DayFilter::new(query);
    let categories = CategoryRepo::list(&state.pool, scope).await?;
    let categories = if filter.is_active() {
        let texts = NoteRepo::texts_for_day(&state.pool, scope).await?;
        filter.apply(categories, |c| c.name.as_str(), |c| c.id, &texts)
    } else {
        categories
    };

    Ok(DayView {
        date: scope.day,
        label: scope.day.long_label(),
        previous: scope.day.previous(),
        next: scope.day.next(),
        search: query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string),
        categories,
    })
}

/// GET /api/v1/days/{date}
pub async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(date): AppPath<String>,
    AppQuery(query): AppQuery<DayQuery>,
) -> AppResult<Json<DataResponse<DayView>>> {
    let scope = day_scope(&auth, &date)?;
    let view = load_day_view(&state, scope, query.q.as_deref()).await?;
    Ok(Json(DataResponse { data: view }))
}
