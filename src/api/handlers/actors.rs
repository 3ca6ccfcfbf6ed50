/*
 * Responsibility
 * - /actors 系 CRUD handler (movies と同じ方針)
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
            actors::{ActorsEnvelope, CreateActorRequest, UpdateActorRequest},
        },
        extractors::{AuthCtx, RecordId},
        handlers::reject_body,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_actors(
    State(state): State<AppState>,
    _auth: AuthCtx,
) -> Result<Json<ActorsEnvelope>, AppError> {
    let rows = state.store.list_actors().await?;

    if rows.is_empty() {
        return Err(AppError::NotFound);
    }

    Ok(Json(ActorsEnvelope::new(rows)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    auth: AuthCtx,
    body: Result<Json<CreateActorRequest>, JsonRejection>,
) -> Result<Json<ActorsEnvelope>, AppError> {
    let Json(req) = body.map_err(reject_body)?;

    let row = state
        .store
        .create_actor(req.into())
        .await
        .map_err(|e| AppError::unprocessable("create_actor", e))?;

    info!(subject = %auth.subject, actor_id = row.id, "actor created");
    Ok(Json(ActorsEnvelope::new([row])))
}

pub async fn update_actor(
    State(state): State<AppState>,
    auth: AuthCtx,
    RecordId(id): RecordId,
    body: Result<Json<UpdateActorRequest>, JsonRejection>,
) -> Result<Json<ActorsEnvelope>, AppError> {
    state.store.get_actor(id).await?.ok_or(AppError::NotFound)?;

    let Json(req) = body.map_err(reject_body)?;

    let row = state
        .store
        .update_actor(id, req.into())
        .await
        .map_err(|e| AppError::unprocessable("update_actor", e))?
        .ok_or(AppError::NotFound)?;

    info!(subject = %auth.subject, actor_id = id, "actor updated");
    Ok(Json(ActorsEnvelope::new([row])))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    auth: AuthCtx,
    RecordId(id): RecordId,
) -> Result<Json<DeletedResponse>, AppError> {
    state.store.get_actor(id).await?.ok_or(AppError::NotFound)?;

    let deleted = state
        .store
        .delete_actor(id)
        .await
        .map_err(|e| AppError::unprocessable("delete_actor", e))?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    info!(subject = %auth.subject, actor_id = id, "actor deleted");
    Ok(Json(DeletedResponse::new(id)))
}
