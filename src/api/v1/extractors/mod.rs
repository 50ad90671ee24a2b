/*
 * Responsibility
 * - handler 向け extractor の re-export
 */
pub mod auth_ctx;

pub use auth_ctx::{Authenticated, ContextError};
