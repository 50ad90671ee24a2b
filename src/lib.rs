//! Bearer-token authentication gate for axum services.
//!
//! An inbound request's `Authorization: Bearer <jwt>` is verified against a
//! trusted public key; on success the verified identity is published into the
//! request's extensions for later handlers, on failure the request is rejected
//! before any handler runs.
//!
//! ```ignore
//! let key = KeyMaterial::rsa_pem(pem_bytes, KeyMaterial::DEFAULT_RSA_ALGORITHM)?;
//! let gate = Arc::new(AuthGate::new(TokenVerifier::new(key, VerifierOptions::default())));
//! let app = middleware::auth::access::apply(protected_routes, gate);
//!
//! async fn handler(Authenticated(auth): Authenticated) -> String {
//!     format!("Hello {}", auth.user())
//! }
//! ```
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use api::v1::extractors::auth_ctx::{Authenticated, ContextError, retrieve, retrieve_from};
pub use error::AppError;
pub use middleware::AuthGate;
pub use services::auth::{
    AuthError, AuthenticationRecord, Claims, Clock, FixedClock, KeyError, KeyMaterial,
    MalformedReason, RejectReason, SystemClock, TokenVerifier, VerifierOptions,
};
