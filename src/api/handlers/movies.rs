/*
 * Responsibility
 * - /movies 系 CRUD handler
 * - 認可は middleware (requires) 済み。handler は AuthCtx を受け取るだけ
 * - 書き込み失敗は 422、空の一覧は 404
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use crate::{
    api::{
        dto::{
            DeletedResponse,
            movies::{CreateMovieRequest, MoviesEnvelope, UpdateMovieRequest},
        },
        extractors::{AuthCtx, RecordId},
        handlers::reject_body,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_movies(
    State(state): State<AppState>,
    _auth: AuthCtx,
) -> Result<Json<MoviesEnvelope>, AppError> {
    let rows = state.store.list_movies().await?;

    if rows.is_empty() {
        return Err(AppError::NotFound);
    }

    Ok(Json(MoviesEnvelope::new(rows)))
}

pub async fn create_movie(
    State(state): State<AppState>,
    auth: AuthCtx,
    body: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Json<MoviesEnvelope>, AppError> {
    let Json(req) = body.map_err(reject_body)?;

    let row = state
        .store
        .create_movie(req.into())
        .await
        .map_err(|e| AppError::unprocessable("create_movie", e))?;

    info!(subject = %auth.subject, movie_id = row.id, "movie created");
    Ok(Json(MoviesEnvelope::new([row])))
}

pub async fn update_movie(
    State(state): State<AppState>,
    auth: AuthCtx,
    RecordId(id): RecordId,
    body: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> Result<Json<MoviesEnvelope>, AppError> {
    // 404 takes precedence over a bad body
    state.store.get_movie(id).await?.ok_or(AppError::NotFound)?;

    let Json(req) = body.map_err(reject_body)?;

    let row = state
        .store
        .update_movie(id, req.into())
        .await
        .map_err(|e| AppError::unprocessable("update_movie", e))?
        .ok_or(AppError::NotFound)?;

    info!(subject = %auth.subject, movie_id = id, "movie updated");
    Ok(Json(MoviesEnvelope::new([row])))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    auth: AuthCtx,
    RecordId(id): RecordId,
) -> Result<Json<DeletedResponse>, AppError> {
    state.store.get_movie(id).await?.ok_or(AppError::NotFound)?;

    let deleted = state
        .store
        .delete_movie(id)
        .await
        .map_err(|e| AppError::unprocessable("delete_movie", e))?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    info!(subject = %auth.subject, movie_id = id, "movie deleted");
    Ok(Json(DeletedResponse::new(id)))
}
