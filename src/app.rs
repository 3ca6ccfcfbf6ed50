/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP/CORS)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::repos::{CastingStore, PgStore, seed};
use crate::services::auth::{AuthService, HttpKeySource};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,casting_agency=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting Casting Agency in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;

    if config.reset_database {
        seed::reset_and_seed(state.store.as_ref())
            .await
            .context("failed to reset and seed database")?;
    }

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let store: Arc<dyn CastingStore> = Arc::new(PgStore::new(pool));

    // The key set is fetched lazily on the first verification.
    let key_source = HttpKeySource::new(
        config.auth.jwks_url.clone(),
        config.auth.jwks_fetch_timeout,
    )?;
    tracing::info!(jwks_url = %config.auth.jwks_url, "using signing key endpoint");
    let auth = Arc::new(AuthService::new(&config.auth, Arc::new(key_source)));

    Ok(AppState::new(store, auth, config.excited))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(&state)
        .fallback(|| async { AppError::NotFound })
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
        .with_state(state);

    // CORS wraps everything, layer-generated 408/413 included
    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}
