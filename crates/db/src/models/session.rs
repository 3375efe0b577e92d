//! User session model and DTOs.

use daybook_core::types::{DbId, EpochMillis};
use sqlx::FromRow;

/// A user session row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: EpochMillis,
    pub is_revoked: bool,
    pub created_at: EpochMillis,
}

/// DTO for creating a new user session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: EpochMillis,
}
