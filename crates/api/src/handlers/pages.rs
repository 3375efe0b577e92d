//! Page models for the date-keyed pages and the auth surfaces.
//!
//! Every route here sits behind [`crate::middleware::page_gate::page_gate`],
//! so handlers only run once the gate has let the request through.

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use daybook_core::auth_gate::{LOGIN_PATH, SIGNUP_PATH};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::handlers::day_scope;
use crate::handlers::days::{load_day_view, DayQuery, DayView};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Model for the login and sign-up pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPage {
    pub page: &'static str,
    pub title: &'static str,
    /// Where the form posts.
    pub submit_path: &'static str,
    /// Link to the other auth surface.
    pub alternate_path: &'static str,
}

/// Model for a day page.
#[derive(Debug, Serialize)]
pub struct DayPage {
    pub page: &'static str,
    pub view: DayView,
}

/// GET /
///
/// The gate always redirects `/`; this is only reached if it did not.
pub async fn root() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

/// GET /login
pub async fn login_page() -> Json<DataResponse<AuthPage>> {
    Json(DataResponse {
        data: AuthPage {
            page: "login",
            title: "Welcome back",
            submit_path: "/api/v1/auth/login",
            alternate_path: SIGNUP_PATH,
        },
    })
}

/// GET /signup
pub async fn signup_page() -> Json<DataResponse<AuthPage>> {
    Json(DataResponse {
        data: AuthPage {
            page: "signup",
            title: "Create an account",
            submit_path: "/api/v1/auth/signup",
            alternate_path: LOGIN_PATH,
        },
    })
}

/// GET /{date}
pub async fn day_page(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(date): AppPath<String>,
    AppQuery(query): AppQuery<DayQuery>,
) -> AppResult<Json<DataResponse<DayPage>>> {
    let scope = day_scope(&auth, &date)?;
    let view = load_day_view(&state, scope, query.q.as_deref()).await?;
    Ok(Json(DataResponse {
        data: DayPage { page: "day", view },
    }))
}
