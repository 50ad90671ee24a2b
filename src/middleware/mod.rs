/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth::access (bearer gate), http (request id / trace / limits)
 */
pub mod auth;
pub mod http;

pub use auth::access::AuthGate;
