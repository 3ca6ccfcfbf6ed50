/*
 * Responsibility
 * - URL 構造を定義
 * - /, /health は認証なし
 * - /movies, /actors は route ごとに requires(...) で permission を掛ける
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::handlers::{
    actors::{create_actor, delete_actor, list_actors, update_actor},
    greeting::greeting,
    health::health,
    movies::{create_movie, delete_movie, list_movies, update_movie},
};
use crate::middleware::auth::requires;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = &state.auth;

    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health))
        .route(
            "/movies",
            requires(get(list_movies), auth, "get:movies")
                .merge(requires(post(create_movie), auth, "post:movies")),
        )
        .route(
            "/movies/{id}",
            requires(patch(update_movie), auth, "patch:movies")
                .merge(requires(delete(delete_movie), auth, "delete:movies")),
        )
        .route(
            "/actors",
            requires(get(list_actors), auth, "get:actors")
                .merge(requires(post(create_actor), auth, "post:actors")),
        )
        .route(
            "/actors/{id}",
            requires(patch(update_actor), auth, "patch:actors")
                .merge(requires(delete(delete_actor), auth, "delete:actors")),
        )
}
