//! Repository for the `actors` table.

use casting_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::actor::{Actor, CreateActor, UpdateActor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, gender";

/// Provides CRUD operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row with its assigned id.
    ///
    /// Fails with a database error if the name is already taken.
    pub async fn create(pool: &SqlitePool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO actors (name, age, gender) \
             VALUES (?1, ?2, ?3) \
             RETURNING {COLUMNS}"
        );
        let actor = sqlx::query_as::<_, Actor>(&query)
            .bind(&input.name)
            .bind(&input.age)
            .bind(&input.gender)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(actor)
    }

    /// Find an actor by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = ?1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all actors in id order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY id");
        sqlx::query_as::<_, Actor>(&query).fetch_all(pool).await
    }

    /// Update an actor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE actors SET \
                name = COALESCE(?2, name), \
                age = COALESCE(?3, age), \
                gender = COALESCE(?4, gender) \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let actor = sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.age)
            .bind(&input.gender)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(actor)
    }

    /// Permanently delete an actor. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM actors WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of actor rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM actors")
            .fetch_one(pool)
            .await
    }
}
