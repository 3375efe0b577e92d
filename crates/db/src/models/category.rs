//! Category model (a named, iconized bucket of notes for one day).

use daybook_core::types::{DbId, EpochMillis};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table with its derived note count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    /// Number of notes in the category, counted at read time.
    pub note_count: i64,
    pub created_at: EpochMillis,
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    pub icon: Option<String>,
}

/// DTO for updating a category. Absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub icon: Option<String>,
}
