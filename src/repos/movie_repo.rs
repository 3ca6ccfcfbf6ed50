/*
 * Responsibility
 * - movies テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 * - 書き込み系は RepoError::from_sqlx で制約違反を区別して返す
 */
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

/// Fields are optional on purpose: a missing value reaches the database as
/// NULL and is rejected there.
#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<MovieRow>> {
    let rows = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, new: &NewMovie) -> RepoResult<MovieRow> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        INSERT INTO movies (title, release_date)
        VALUES ($1, $2)
        RETURNING id, title, release_date
        "#,
    )
    .bind(new.title.as_deref())
    .bind(new.release_date.as_deref())
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, patch: &MoviePatch) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        UPDATE movies
        SET
            title = COALESCE($2, title),
            release_date = COALESCE($3, release_date)
        WHERE id = $1
        RETURNING id, title, release_date
        "#,
    )
    .bind(id)
    .bind(patch.title.as_deref())
    .bind(patch.release_date.as_deref())
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM movies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}
