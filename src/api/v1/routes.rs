/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 保護対象 (/hello, /me) にだけ gate を掛ける。/health は公開
 */
use std::sync::Arc;

use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    hello::{hello, me},
};
use crate::middleware::{AuthGate, auth::access};

pub fn routes(gate: Arc<AuthGate>) -> Router {
    let protected = Router::new()
        .route("/hello", get(hello))
        .route("/me", get(me));

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(protected, gate))
}
