use jsonwebtoken::{Algorithm, DecodingKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("algorithm {0:?} is not an asymmetric signature algorithm")]
    NotAsymmetric(Algorithm),

    #[error("algorithm {alg:?} cannot be used with a {family} key")]
    FamilyMismatch {
        alg: Algorithm,
        family: &'static str,
    },

    #[error("invalid {family} public key pem: {source}")]
    InvalidPem {
        family: &'static str,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
}

/// Already-parsed public key used only for signature verification.
///
/// Bound to exactly one algorithm so a token cannot pick its own.
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct KeyMaterial {
    key: DecodingKey,
    algorithm: Algorithm,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl KeyMaterial {
    /// Algorithm used when the host does not pick one for an RSA key.
    pub const DEFAULT_RSA_ALGORITHM: Algorithm = Algorithm::RS512;

    /// RSA public key (PKCS#1 or SPKI PEM) for RS* / PS* tokens.
    pub fn rsa_pem(pem: &[u8], algorithm: Algorithm) -> Result<Self, KeyError> {
        Self::check(algorithm, "rsa", |alg| {
            matches!(
                alg,
                Algorithm::RS256
                    | Algorithm::RS384
                    | Algorithm::RS512
                    | Algorithm::PS256
                    | Algorithm::PS384
                    | Algorithm::PS512
            )
        })?;
        let key = DecodingKey::from_rsa_pem(pem).map_err(|source| KeyError::InvalidPem {
            family: "rsa",
            source,
        })?;
        Ok(Self { key, algorithm })
    }

    /// EC public key (SPKI PEM) for ES256 / ES384 tokens.
    pub fn ec_pem(pem: &[u8], algorithm: Algorithm) -> Result<Self, KeyError> {
        Self::check(algorithm, "ec", |alg| {
            matches!(alg, Algorithm::ES256 | Algorithm::ES384)
        })?;
        let key = DecodingKey::from_ec_pem(pem).map_err(|source| KeyError::InvalidPem {
            family: "ec",
            source,
        })?;
        Ok(Self { key, algorithm })
    }

    /// Ed25519 public key (SPKI PEM) for EdDSA tokens.
    pub fn ed_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let key = DecodingKey::from_ed_pem(pem).map_err(|source| KeyError::InvalidPem {
            family: "ed25519",
            source,
        })?;
        Ok(Self {
            key,
            algorithm: Algorithm::EdDSA,
        })
    }

    /// Picks the key family from the algorithm.
    pub fn from_pem(pem: &[u8], algorithm: Algorithm) -> Result<Self, KeyError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                Err(KeyError::NotAsymmetric(algorithm))
            }
            Algorithm::ES256 | Algorithm::ES384 => Self::ec_pem(pem, algorithm),
            Algorithm::EdDSA => Self::ed_pem(pem),
            _ => Self::rsa_pem(pem, algorithm),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }

    fn check(
        algorithm: Algorithm,
        family: &'static str,
        fits: impl Fn(Algorithm) -> bool,
    ) -> Result<(), KeyError> {
        if matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(KeyError::NotAsymmetric(algorithm));
        }
        if !fits(algorithm) {
            return Err(KeyError::FamilyMismatch {
                alg: algorithm,
                family,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSA_PUB: &str = include_str!("../../../tests/fixtures/signing.pub");
    const ED_PUB: &str = include_str!("../../../tests/fixtures/ed25519.pub");

    #[test]
    fn rsa_key_defaults_to_rs512() {
        let key = KeyMaterial::rsa_pem(RSA_PUB.as_bytes(), KeyMaterial::DEFAULT_RSA_ALGORITHM)
            .unwrap();
        assert_eq!(key.algorithm(), Algorithm::RS512);
    }

    #[test]
    fn symmetric_algorithms_are_refused() {
        let err = KeyMaterial::from_pem(RSA_PUB.as_bytes(), Algorithm::HS256).unwrap_err();
        assert!(matches!(err, KeyError::NotAsymmetric(Algorithm::HS256)));

        let err = KeyMaterial::rsa_pem(RSA_PUB.as_bytes(), Algorithm::HS512).unwrap_err();
        assert!(matches!(err, KeyError::NotAsymmetric(Algorithm::HS512)));
    }

    #[test]
    fn algorithm_must_fit_key_family() {
        let err = KeyMaterial::rsa_pem(RSA_PUB.as_bytes(), Algorithm::ES256).unwrap_err();
        assert!(matches!(err, KeyError::FamilyMismatch { family: "rsa", .. }));
    }

    #[test]
    fn ed25519_key_is_bound_to_eddsa() {
        let key = KeyMaterial::from_pem(ED_PUB.as_bytes(), Algorithm::EdDSA).unwrap();
        assert_eq!(key.algorithm(), Algorithm::EdDSA);
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let err = KeyMaterial::rsa_pem(b"not a pem", Algorithm::RS512).unwrap_err();
        assert!(matches!(err, KeyError::InvalidPem { family: "rsa", .. }));
    }

    #[test]
    fn debug_hides_key_bytes() {
        let key = KeyMaterial::rsa_pem(RSA_PUB.as_bytes(), Algorithm::RS512).unwrap();
        let printed = format!("{key:?}");
        assert!(printed.contains("RS512"));
        assert!(!printed.contains("MII"));
    }
}
