/*
 * Responsibility
 * - actors テーブル向け SQLx 操作
 * - movie_repo と同じ形 (list/get/create/update/delete)
 */
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ActorRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewActor {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<ActorRow>> {
    let rows = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, new: &NewActor) -> RepoResult<ActorRow> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        INSERT INTO actors (name, age, gender)
        VALUES ($1, $2, $3)
        RETURNING id, name, age, gender
        "#,
    )
    .bind(new.name.as_deref())
    .bind(new.age)
    .bind(new.gender.as_deref())
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, patch: &ActorPatch) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        UPDATE actors
        SET
            name = COALESCE($2, name),
            age = COALESCE($3, age),
            gender = COALESCE($4, gender)
        WHERE id = $1
        RETURNING id, name, age, gender
        "#,
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.age)
    .bind(patch.gender.as_deref())
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM actors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}
