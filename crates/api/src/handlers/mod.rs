pub mod auth;
pub mod categories;
pub mod days;
pub mod notes;
pub mod pages;
pub mod suggestions;

use daybook_core::dates::Day;
use daybook_db::models::scope::DayScope;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Parse the `{date}` path segment and pair it with the caller.
///
/// An invalid date is rejected with `INVALID_DATE`.
pub(crate) fn day_scope(auth: &AuthUser, date: &str) -> AppResult<DayScope> {
    let day: Day = date.parse()?;
    Ok(DayScope::new(auth.user_id, day))
}
