//! access token (JWT) 検証 → AuthenticationRecord を extensions に入れる
//!
//! Flow:
//! - `Authorization: Bearer <jwt>` を取り出す (services::auth::bearer)
//! - 署名 / alg / claims / exp を検証する (services::auth::access_jwt)
//! - 失敗: status を決めて終了、後段は呼ばない
//! - 成功: record を publish した新しい request で後段を一度だけ呼ぶ

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::auth_ctx;
use crate::error::AppError;
use crate::services::auth::{AuthError, AuthenticationRecord, TokenVerifier, bearer};

/// Immutable authentication gate, shared by reference across requests.
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: TokenVerifier,
    verbose_diagnostics: bool,
}

impl AuthGate {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier,
            verbose_diagnostics: false,
        }
    }

    /// Log user/roles on success and the classified failure on rejection.
    #[must_use]
    pub fn with_verbose_diagnostics(mut self, enabled: bool) -> Self {
        self.verbose_diagnostics = enabled;
        self
    }

    /// Extract + verify. Hostile input only ever yields an `Err`.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticationRecord, AuthError> {
        let outcome = bearer::extract_bearer(headers).and_then(|token| self.verifier.verify(token));

        match &outcome {
            Ok(record) if self.verbose_diagnostics => {
                tracing::info!(
                    user = %record.user(),
                    roles = ?record.roles(),
                    "authorized request"
                );
            }
            Err(AuthError::Internal(detail)) => {
                tracing::error!(error = %detail, "authentication failed internally");
            }
            Err(err) if self.verbose_diagnostics => {
                tracing::warn!(
                    error = %err,
                    status = err.status().as_u16(),
                    "access token rejected"
                );
            }
            _ => {}
        }

        outcome
    }
}

/// Protect every route of `router` with the gate.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, gate.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, gate: Arc<AuthGate>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // The gate is middleware state, independent of the router's own state.
    router.layer(middleware::from_fn_with_state(gate, access_middleware))
}

async fn access_middleware(
    State(gate): State<Arc<AuthGate>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let record = gate.authenticate(req.headers())?;

    // middleware → extractor への受け渡し
    let req = auth_ctx::publish(req, record);

    Ok(next.run(req).await)
}
