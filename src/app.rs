/*
 * Responsibility
 * - Config読み込み → AuthGate 生成 → Router 組み立て
 * - Middleware の適用 (request id / trace / limits, bearer gate)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{self, AuthGate};
use crate::services::auth::build_auth_gate;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,sso_gate=debug,tower_http=debug cargo run
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
        tracing::error!(?info, "panic");

        // In development, fail fast so we notice immediately.
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
        algorithm = ?config.auth.algorithm,
        verbose_diagnostics = config.auth.verbose_diagnostics,
        "starting resource server in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let gate = build_auth_gate(&config.auth)?;
    let app = build_router(gate);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(gate: Arc<AuthGate>) -> Router {
    let router = Router::new().nest("/api/v1", api::v1::routes(gate));
    middleware::http::apply(router, middleware::http::HttpOptions::default())
}
