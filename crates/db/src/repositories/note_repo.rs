//! Repository for the `notes` table.

use daybook_core::types::{DbId, EpochMillis};
use sqlx::SqlitePool;

use crate::models::note::{NewNote, Note, NotePatch};
use crate::models::scope::DayScope;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, image_url, voice_url, is_favorite, created_at, updated_at";

/// Provides CRUD operations for the notes of one category.
pub struct NoteRepo;

impl NoteRepo {
    /// List a category's notes, newest first.
    pub async fn list(
        pool: &SqlitePool,
        scope: DayScope,
        category_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE category_id = ?1 AND user_id = ?2 AND day = ?3
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(category_id)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .fetch_all(pool)
            .await
    }

    /// Find a note by ID within its category.
    pub async fn find_by_id(
        pool: &SqlitePool,
        scope: DayScope,
        category_id: DbId,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE id = ?1 AND category_id = ?2 AND user_id = ?3 AND day = ?4"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(category_id)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .fetch_optional(pool)
            .await
    }

    /// Insert a note into a category.
    ///
    /// The insert only happens if the category exists in scope, so a note can
    /// never be created under a missing or foreign category. Returns `None`
    /// in that case.
    pub async fn create(
        pool: &SqlitePool,
        scope: DayScope,
        category_id: DbId,
        input: &NewNote,
        now: EpochMillis,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes
                (category_id, user_id, day, text, image_url, is_favorite, created_at, updated_at)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7
             WHERE EXISTS (
                SELECT 1 FROM categories WHERE id = ?1 AND user_id = ?2 AND day = ?3
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(category_id)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .bind(&input.text)
            .bind(&input.image_url)
            .bind(input.is_favorite)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update and stamp `updated_at = now`.
    ///
    /// When `patch.expected_updated_at` is set the row is only written if it
    /// still carries that timestamp. Returns `None` when the note is missing
    /// or the token is stale; callers tell the two apart with
    /// [`NoteRepo::find_by_id`].
    pub async fn update(
        pool: &SqlitePool,
        scope: DayScope,
        category_id: DbId,
        id: DbId,
        patch: &NotePatch,
        now: EpochMillis,
    ) -> Result<Option<Note>, sqlx::Error> {
        let (set_image, image_url) = match &patch.image_url {
            Some(url) => (true, url.clone()),
            None => (false, None),
        };

        let query = format!(
            "UPDATE notes SET
                text = COALESCE(?5, text),
                image_url = CASE WHEN ?6 THEN ?7 ELSE image_url END,
                is_favorite = COALESCE(?8, is_favorite),
                updated_at = ?9
             WHERE id = ?1 AND category_id = ?2 AND user_id = ?3 AND day = ?4
               AND (?10 IS NULL OR updated_at = ?10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(category_id)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .bind(&patch.text)
            .bind(set_image)
            .bind(image_url)
            .bind(patch.is_favorite)
            .bind(now)
            .bind(patch.expected_updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &SqlitePool,
        scope: DayScope,
        category_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notes WHERE id = ?1 AND category_id = ?2 AND user_id = ?3 AND day = ?4",
        )
        .bind(id)
        .bind(category_id)
        .bind(scope.user_id)
        .bind(scope.day_key())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `(category_id, text)` for every note of the day, for day-wide search.
    pub async fn texts_for_day(
        pool: &SqlitePool,
        scope: DayScope,
    ) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, String)>(
            "SELECT category_id, text FROM notes WHERE user_id = ?1 AND day = ?2",
        )
        .bind(scope.user_id)
        .bind(scope.day_key())
        .fetch_all(pool)
        .await
    }
}
