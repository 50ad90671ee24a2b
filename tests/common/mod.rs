#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use sso_gate::{AuthGate, Claims, FixedClock, KeyMaterial, TokenVerifier, VerifierOptions};

pub const SIGNING_KEY: &str = include_str!("../fixtures/signing.key");
pub const SIGNING_PUB: &str = include_str!("../fixtures/signing.pub");
pub const FOREIGN_KEY: &str = include_str!("../fixtures/foreign.key");
pub const ED25519_KEY: &str = include_str!("../fixtures/ed25519.key");

/// Frozen "now" used by most tests.
pub const NOW: i64 = 1_700_000_000;

pub fn claims(user: &str, roles: &[&str], exp: i64) -> Claims {
    Claims {
        user: user.to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        exp,
        iss: "Example".to_owned(),
        nbf: None,
    }
}

pub fn sign_rs512<T: serde::Serialize>(claims: &T, private_pem: &str) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS512), claims, &key).unwrap()
}

pub fn sign_ed25519<T: serde::Serialize>(claims: &T) -> String {
    let key = EncodingKey::from_ed_pem(ED25519_KEY.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).unwrap()
}

pub fn trusted_key() -> KeyMaterial {
    KeyMaterial::rsa_pem(SIGNING_PUB.as_bytes(), Algorithm::RS512).unwrap()
}

pub fn verifier_at(now: i64) -> TokenVerifier {
    TokenVerifier::with_clock(
        trusted_key(),
        VerifierOptions::default(),
        Arc::new(FixedClock(now)),
    )
}

pub fn gate_at(now: i64) -> Arc<AuthGate> {
    Arc::new(AuthGate::new(verifier_at(now)))
}

pub fn valid_token() -> String {
    sign_rs512(&claims("user1", &["role1", "role2"], NOW + 1000), SIGNING_KEY)
}
