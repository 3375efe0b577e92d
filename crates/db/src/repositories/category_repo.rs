//! Repository for the `categories` table.

use daybook_core::notes::PREDEFINED_CATEGORIES;
use daybook_core::types::{DbId, EpochMillis};
use sqlx::SqlitePool;

use crate::models::category::{Category, UpdateCategory};
use crate::models::scope::DayScope;

/// Column list for category reads. `note_count` is counted per row.
const COLUMNS: &str = "c.id, c.name, c.icon, \
                       (SELECT COUNT(*) FROM notes n WHERE n.category_id = c.id) AS note_count, \
                       c.created_at";

/// Provides CRUD operations for the categories of one `(user, day)`.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List the day's categories, oldest first, with their note counts.
    pub async fn list(pool: &SqlitePool, scope: DayScope) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories c
             WHERE c.user_id = ?1 AND c.day = ?2
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .fetch_all(pool)
            .await
    }

    /// Find a category by ID within the scope.
    pub async fn find_by_id(
        pool: &SqlitePool,
        scope: DayScope,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories c
             WHERE c.id = ?1 AND c.user_id = ?2 AND c.day = ?3"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(scope.user_id)
            .bind(scope.day_key())
            .fetch_optional(pool)
            .await
    }

    /// Create a category, returning it with `note_count = 0`.
    pub async fn create(
        pool: &SqlitePool,
        scope: DayScope,
        name: &str,
        icon: &str,
        now: EpochMillis,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (user_id, day, name, icon, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, name, icon, 0 AS note_count, created_at",
        )
        .bind(scope.user_id)
        .bind(scope.day_key())
        .bind(name)
        .bind(icon)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Update name and/or icon. Returns `None` if the category is not in scope.
    pub async fn update(
        pool: &SqlitePool,
        scope: DayScope,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET
                name = COALESCE(?4, name),
                icon = COALESCE(?5, icon)
             WHERE id = ?1 AND user_id = ?2 AND day = ?3",
        )
        .bind(id)
        .bind(scope.user_id)
        .bind(scope.day_key())
        .bind(&input.name)
        .bind(&input.icon)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, scope, id).await
    }

    /// Delete a category together with all of its notes in one transaction.
    ///
    /// Returns the number of notes removed, or `None` if the category is not
    /// in scope (in which case nothing is deleted).
    pub async fn delete_cascade(
        pool: &SqlitePool,
        scope: DayScope,
        id: DbId,
    ) -> Result<Option<u64>, sqlx::Error> {
        let day = scope.day_key();
        let mut tx = pool.begin().await?;

        let notes_deleted =
            sqlx::query("DELETE FROM notes WHERE category_id = ?1 AND user_id = ?2 AND day = ?3")
                .bind(id)
                .bind(scope.user_id)
                .bind(&day)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        let category_deleted =
            sqlx::query("DELETE FROM categories WHERE id = ?1 AND user_id = ?2 AND day = ?3")
                .bind(id)
                .bind(scope.user_id)
                .bind(&day)
                .execute(&mut *tx)
                .await?
                .rows_affected()
                > 0;

        if !category_deleted {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        tracing::debug!(
            user_id = scope.user_id,
            day = %scope.day,
            category_id = id,
            notes_deleted,
            "Category deleted with its notes"
        );
        Ok(Some(notes_deleted))
    }

    /// Insert the predefined categories the first time a day is opened.
    ///
    /// The `(user, day)` row in `seeded_days` is claimed with a conditional
    /// insert as the transaction's first statement, so of several concurrent
    /// callers exactly one wins. The winner inserts the starter set only if
    /// the day has no categories yet. Returns `true` if categories were added.
    pub async fn seed_predefined_if_needed(
        pool: &SqlitePool,
        scope: DayScope,
        now: EpochMillis,
    ) -> Result<bool, sqlx::Error> {
        let day = scope.day_key();
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query(
            "INSERT INTO seeded_days (user_id, day, seeded_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, day) DO NOTHING",
        )
        .bind(scope.user_id)
        .bind(&day)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !claimed {
            tx.commit().await?;
            return Ok(false);
        }

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE user_id = ?1 AND day = ?2")
                .bind(scope.user_id)
                .bind(&day)
                .fetch_one(&mut *tx)
                .await?;

        if existing > 0 {
            tx.commit().await?;
            return Ok(false);
        }

        for seed in PREDEFINED_CATEGORIES {
            sqlx::query(
                "INSERT INTO categories (user_id, day, name, icon, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(scope.user_id)
            .bind(&day)
            .bind(seed.name)
            .bind(seed.icon)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
