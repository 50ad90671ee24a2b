//! Factory: build the shared `AuthGate` from application `Config`.
//!
//! This is host plumbing: it is the only place that touches the filesystem
//! for key material. The gate receives parsed keys only.

use std::sync::Arc;

use anyhow::Context;

use crate::config::{AuthConfig, PublicKeySource};
use crate::middleware::AuthGate;
use crate::services::auth::{KeyMaterial, TokenVerifier};

pub fn build_auth_gate(config: &AuthConfig) -> anyhow::Result<Arc<AuthGate>> {
    let pem = match &config.public_key {
        PublicKeySource::Inline(pem) => pem.clone().into_bytes(),
        PublicKeySource::File(path) => std::fs::read(path)
            .with_context(|| format!("reading public key file {}", path.display()))?,
    };

    let key = KeyMaterial::from_pem(&pem, config.algorithm).context("loading public key")?;
    let verifier = TokenVerifier::new(key, config.verifier_options());
    let gate = AuthGate::new(verifier).with_verbose_diagnostics(config.verbose_diagnostics);

    Ok(Arc::new(gate))
}
