//! Destructive database reset with one demo row per table.
//!
//! Only ever invoked when `RESET_DATABASE=true`; a deployed instance must
//! never run this by default.

use crate::models::actor::Actor;
use crate::models::movie::Movie;
use crate::DbPool;

pub const DEMO_ACTOR_NAME: &str = "Leonardo Wilhelm DiCaprio";
pub const DEMO_ACTOR_AGE: &str = "48";
pub const DEMO_ACTOR_GENDER: &str = "male";
pub const DEMO_MOVIE_TITLE: &str = "Catch Me If You Can";
pub const DEMO_MOVIE_RELEASE_DATE: &str = "2002";

/// Delete every actor and movie, restart both id sequences, and insert the
/// demo rows. Runs as a single transaction.
pub async fn reset_and_seed(pool: &DbPool) -> Result<(Actor, Movie), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM actors").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM movies").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('actors', 'movies')")
        .execute(&mut *tx)
        .await?;

    let actor = sqlx::query_as::<_, Actor>(
        "INSERT INTO actors (name, age, gender) VALUES (?1, ?2, ?3) \
         RETURNING id, name, age, gender",
    )
    .bind(DEMO_ACTOR_NAME)
    .bind(DEMO_ACTOR_AGE)
    .bind(DEMO_ACTOR_GENDER)
    .fetch_one(&mut *tx)
    .await?;

    let movie = sqlx::query_as::<_, Movie>(
        "INSERT INTO movies (title, release_date) VALUES (?1, ?2) \
         RETURNING id, title, release_date",
    )
    .bind(DEMO_MOVIE_TITLE)
    .bind(DEMO_MOVIE_RELEASE_DATE)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::warn!(
        actor_id = actor.id,
        movie_id = movie.id,
        "Database reset; all actors and movies replaced with demo rows"
    );
    Ok((actor, movie))
}
