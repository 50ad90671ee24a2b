use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{Extensions, Request, request::Parts};

use crate::error::AppError;
use crate::services::auth::AuthenticationRecord;

use super::types::{AuthSlot, ContextError};

/// Return a new request carrying `record` in its context.
///
/// Only the gate publishes; a second publish on the same request replaces the first.
pub(crate) fn publish<B>(req: Request<B>, record: AuthenticationRecord) -> Request<B> {
    let (mut parts, body) = req.into_parts();
    parts.extensions.insert(AuthSlot(Arc::new(record)));
    Request::from_parts(parts, body)
}

/// Read the record the gate published for this request.
///
/// Read-only and idempotent: repeated calls return the same record.
pub fn retrieve(
    extensions: Option<&Extensions>,
) -> Result<Arc<AuthenticationRecord>, ContextError> {
    let extensions = extensions.ok_or(ContextError::NoContext)?;
    let slot = extensions
        .get::<AuthSlot>()
        .ok_or(ContextError::NotFound)?;

    Arc::clone(&slot.0)
        .downcast::<AuthenticationRecord>()
        .map_err(|_| ContextError::WrongType)
}

pub fn retrieve_from<B>(req: &Request<B>) -> Result<Arc<AuthenticationRecord>, ContextError> {
    retrieve(Some(req.extensions()))
}

/// Handler で AuthenticationRecord を受け取るための extractor
///
/// Gate が publish 済みである前提。見つからない場合は配線ミスなので 500 を返す。
#[derive(Debug, Clone)]
pub struct Authenticated(pub Arc<AuthenticationRecord>);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        retrieve(Some(&parts.extensions))
            .map(Authenticated)
            .map_err(|err| {
                tracing::error!(error = %err, "authentication record unavailable in handler");
                AppError::from(err)
            })
    }
}
