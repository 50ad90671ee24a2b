use std::{fmt, sync::Arc};

use jsonwebtoken::Validation;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::error::{AuthError, MalformedReason, RejectReason};
use super::key::KeyMaterial;

/// Access token (JWT) claims as issued by the SSO server.
///
/// NOTE:
/// - `user`, `roles`, `exp` and `iss` are required. A token that omits one is malformed, it is not defaulted.
/// - `nbf` is optional; when present it is enforced like `exp`.
/// - Unknown extra claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

/// Verified identity handed to downstream handlers.
///
/// Only `TokenVerifier` builds one, and only after signature and expiry passed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticationRecord {
    user: String,
    roles: Vec<String>,
    token: String,
}

impl AuthenticationRecord {
    pub(crate) fn new(user: String, roles: Vec<String>, token: String) -> Self {
        Self { user, roles, token }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Roles in the order the issuer listed them.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// The original bearer credential, for audit or pass-through to upstreams.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthenticationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the credential
        f.debug_struct("AuthenticationRecord")
            .field("user", &self.user)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// Expected `iss`. `None` accepts any issuer (the claim must still be present).
    pub issuer: Option<String>,
    pub leeway_seconds: u64,
    pub max_token_bytes: usize,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            issuer: None,
            leeway_seconds: 0,
            max_token_bytes: 8 * 1024,
        }
    }
}

/// Stateless access-token verifier.
///
/// Verification is a pure function of (token, key, clock).
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: KeyMaterial,
    validation: Validation,
    options: VerifierOptions,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(key: KeyMaterial, options: VerifierOptions) -> Self {
        Self::with_clock(key, options, Arc::new(SystemClock))
    }

    pub fn with_clock(key: KeyMaterial, options: VerifierOptions, clock: Arc<dyn Clock>) -> Self {
        // Only the key's own algorithm is acceptable; `alg` in the header never chooses.
        let mut validation = Validation::new(key.algorithm());
        // exp/nbf are checked against `clock` below, not the library's wall clock.
        // `exp` presence is enforced by `Claims` itself; the library reads it as
        // unsigned and would call a negative (long past) expiry "missing".
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["iss"]);
        if let Some(issuer) = &options.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key,
            validation,
            options,
            clock,
        }
    }

    /// Verify signature + claims and promote them to an `AuthenticationRecord`.
    ///
    /// `jsonwebtoken::decode` checks, in order:
    /// - envelope (3 segments, base64url, JSON header)
    /// - header `alg` equals the key's algorithm
    /// - signature
    /// - required claims (`user`, `roles`, `exp`, `iss`) and `iss` value when configured
    ///
    /// This method additionally checks:
    /// - token length bound (before any parsing)
    /// - `user` is not blank
    /// - `exp` is in the future relative to `clock`
    /// - `nbf`, if present, is not in the future relative to `clock`
    pub fn verify(&self, token: &str) -> Result<AuthenticationRecord, AuthError> {
        if token.len() > self.options.max_token_bytes {
            return Err(AuthError::TokenMalformed(MalformedReason::TooLong));
        }

        let claims = self.decode(token)?;

        if claims.user.trim().is_empty() {
            return Err(AuthError::TokenMalformed(MalformedReason::EmptyUser));
        }

        if !self.is_live(claims.exp) {
            return Err(AuthError::SignatureInvalid(RejectReason::Expired));
        }

        if claims.nbf.is_some_and(|nbf| !self.has_started(nbf)) {
            return Err(AuthError::SignatureInvalid(RejectReason::NotYetValid));
        }

        Ok(AuthenticationRecord::new(
            claims.user,
            claims.roles,
            token.to_owned(),
        ))
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        // Header first, so an unreadable envelope is never reported as a claims problem.
        jsonwebtoken::decode_header(token)
            .map_err(|_| AuthError::TokenMalformed(MalformedReason::Envelope))?;

        let data =
            jsonwebtoken::decode::<Claims>(token, self.key.decoding_key(), &self.validation)?;
        Ok(data.claims)
    }

    fn leeway(&self) -> i64 {
        i64::try_from(self.options.leeway_seconds).unwrap_or(i64::MAX)
    }

    // exp must be strictly after now (minus leeway).
    fn is_live(&self, exp: i64) -> bool {
        exp > self.clock.now_unix().saturating_sub(self.leeway())
    }

    // nbf may be at most now (plus leeway).
    fn has_started(&self, nbf: i64) -> bool {
        nbf <= self.clock.now_unix().saturating_add(self.leeway())
    }
}
