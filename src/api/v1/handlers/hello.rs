/*
 * Responsibility
 * - GET /api/v1/hello, GET /api/v1/me (gate の後ろ)
 * - Authenticated extractor で検証済みの user/roles を受け取る
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::Authenticated;

pub async fn hello(Authenticated(auth): Authenticated) -> String {
    format!("Hello {}", auth.user())
}

pub async fn me(Authenticated(auth): Authenticated) -> Json<MeResponse> {
    // The raw token stays server-side.
    Json(MeResponse {
        user: auth.user().to_owned(),
        roles: auth.roles().to_vec(),
    })
}
