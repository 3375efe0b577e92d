//! Note model (a text item belonging to a category).

use daybook_core::types::{DbId, EpochMillis};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub text: String,
    pub image_url: Option<String>,
    pub voice_url: Option<String>,
    pub is_favorite: bool,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
}

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub text: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Request body for updating a note. Absent fields keep their value; an
/// empty `imageUrl` clears the image.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub is_favorite: Option<bool>,
    /// Optimistic concurrency token: the `updatedAt` the client last saw.
    pub expected_updated_at: Option<EpochMillis>,
}

/// Request body for the favorite toggle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFavorite {
    pub is_favorite: bool,
}

/// Validated note fields ready to insert.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub text: String,
    pub image_url: Option<String>,
    pub is_favorite: bool,
}

/// Validated partial update. `image_url: Some(None)` clears the image.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub text: Option<String>,
    pub image_url: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub expected_updated_at: Option<EpochMillis>,
}
