//! Store interface injected into handlers through `AppState`.
//!
//! Handlers never touch the pool directly; they see `dyn CastingStore`, which
//! keeps them testable against the in-memory implementation.
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::actor_repo::{self, ActorPatch, ActorRow, NewActor};
use crate::repos::error::RepoResult;
use crate::repos::movie_repo::{self, MoviePatch, MovieRow, NewMovie};

#[async_trait]
pub trait CastingStore: Send + Sync + 'static {
    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>>;
    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>>;
    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow>;
    // Returns `None` when no row has this id.
    async fn update_movie(&self, id: i64, patch: MoviePatch) -> RepoResult<Option<MovieRow>>;
    async fn delete_movie(&self, id: i64) -> RepoResult<bool>;

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>>;
    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>>;
    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow>;
    async fn update_actor(&self, id: i64, patch: ActorPatch) -> RepoResult<Option<ActorRow>>;
    async fn delete_actor(&self, id: i64) -> RepoResult<bool>;

    /// Remove every row and restart id assignment.
    async fn reset(&self) -> RepoResult<()>;
}

/// PostgreSQL-backed store.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CastingStore for PgStore {
    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>> {
        movie_repo::list(&self.pool).await
    }

    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        movie_repo::get(&self.pool, id).await
    }

    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow> {
        movie_repo::create(&self.pool, &new).await
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> RepoResult<Option<MovieRow>> {
        movie_repo::update(&self.pool, id, &patch).await
    }

    async fn delete_movie(&self, id: i64) -> RepoResult<bool> {
        movie_repo::delete(&self.pool, id).await
    }

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>> {
        actor_repo::list(&self.pool).await
    }

    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        actor_repo::get(&self.pool, id).await
    }

    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow> {
        actor_repo::create(&self.pool, &new).await
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> RepoResult<Option<ActorRow>> {
        actor_repo::update(&self.pool, id, &patch).await
    }

    async fn delete_actor(&self, id: i64) -> RepoResult<bool> {
        actor_repo::delete(&self.pool, id).await
    }

    async fn reset(&self) -> RepoResult<()> {
        sqlx::query("TRUNCATE movies, actors RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
