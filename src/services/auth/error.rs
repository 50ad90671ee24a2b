/*
 * Responsibility
 * - Classified failures of bearer extraction + token verification
 * - Failure kind -> HTTP status mapping (the gate's only decision table)
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Why a token was structurally unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Longer than the configured maximum; never parsed.
    TooLong,
    /// Header/payload/signature segments could not be decoded.
    Envelope,
    /// Claims do not match the expected shape (missing/mistyped fields).
    Claims,
    /// `user` claim present but blank.
    EmptyUser,
}

/// Why a readable token is not trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    BadSignature,
    AlgorithmMismatch,
    Expired,
    /// `nbf` is still in the future.
    NotYetValid,
    IssuerMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no authorization header")]
    NoAuthorization,

    #[error("malformed authorization header")]
    MalformedAuthorization,

    #[error("malformed token: {0:?}")]
    TokenMalformed(MalformedReason),

    #[error("token rejected: {0:?}")]
    SignatureInvalid(RejectReason),

    #[error("internal authentication failure: {0}")]
    Internal(String),
}

impl AuthError {
    /// Transport outcome for this failure.
    ///
    /// | kind                                      | status |
    /// |-------------------------------------------|--------|
    /// | `MalformedAuthorization`, `TokenMalformed` | 400    |
    /// | `NoAuthorization`, `SignatureInvalid`      | 401    |
    /// | `Internal`                                 | 500    |
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedAuthorization | Self::TokenMalformed(_) => StatusCode::BAD_REQUEST,
            Self::NoAuthorization | Self::SignatureInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::SignatureInvalid(RejectReason::Expired))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::InvalidAlgorithmName => Self::TokenMalformed(MalformedReason::Envelope),
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                Self::TokenMalformed(MalformedReason::Claims)
            }
            ErrorKind::InvalidSignature => Self::SignatureInvalid(RejectReason::BadSignature),
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                Self::SignatureInvalid(RejectReason::AlgorithmMismatch)
            }
            ErrorKind::ExpiredSignature => Self::SignatureInvalid(RejectReason::Expired),
            ErrorKind::ImmatureSignature => Self::SignatureInvalid(RejectReason::NotYetValid),
            ErrorKind::InvalidIssuer => Self::SignatureInvalid(RejectReason::IssuerMismatch),
            // Key parsing/usage problems are ours, not the caller's.
            _ => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    #[test]
    fn status_table_matches_failure_kinds() {
        assert_eq!(
            AuthError::MalformedAuthorization.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::TokenMalformed(MalformedReason::Envelope).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::NoAuthorization.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::SignatureInvalid(RejectReason::BadSignature).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SignatureInvalid(RejectReason::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn expiry_stays_distinguishable_from_bad_signature() {
        let expired = AuthError::SignatureInvalid(RejectReason::Expired);
        let forged = AuthError::SignatureInvalid(RejectReason::BadSignature);

        assert!(expired.is_expired());
        assert!(!forged.is_expired());
        assert_ne!(expired, forged);
        assert_eq!(expired.status(), forged.status());
    }

    #[test]
    fn jwt_errors_are_classified() {
        let e: AuthError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidSignature).into();
        assert_eq!(e, AuthError::SignatureInvalid(RejectReason::BadSignature));

        let e: AuthError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken).into();
        assert_eq!(e, AuthError::TokenMalformed(MalformedReason::Envelope));

        let e: AuthError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidAlgorithm).into();
        assert_eq!(e, AuthError::SignatureInvalid(RejectReason::AlgorithmMismatch));

        let e: AuthError = jsonwebtoken::errors::Error::from(ErrorKind::ImmatureSignature).into();
        assert_eq!(e, AuthError::SignatureInvalid(RejectReason::NotYetValid));
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);

        let e: AuthError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidKeyFormat).into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
