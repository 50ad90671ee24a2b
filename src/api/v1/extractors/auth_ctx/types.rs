use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no request context supplied")]
    NoContext,
    #[error("no authentication record in request context")]
    NotFound,
    #[error("value under the authentication key has an unexpected type")]
    WrongType,
}

/// Extensions key for the authentication record.
///
/// The type is private to this module tree, so nothing outside can insert
/// or shadow it. The payload is type-erased and checked on read.
#[derive(Clone)]
pub(super) struct AuthSlot(pub(super) Arc<dyn Any + Send + Sync>);
