/*
 * Responsibility
 * - 環境変数からの設定読み込み (PORT, APP_ENV, AUTH_*)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::services::auth::{KeyMaterial, VerifierOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the host finds the verification key. The gate itself only ever sees parsed PEM bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub public_key: PublicKeySource,
    pub algorithm: Algorithm,
    pub issuer: Option<String>,
    pub leeway_seconds: u64,
    pub max_token_bytes: usize,
    // Logs user/roles on every attempt; high volume and privacy-sensitive.
    pub verbose_diagnostics: bool,
}

impl AuthConfig {
    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            issuer: self.issuer.clone(),
            leeway_seconds: self.leeway_seconds,
            max_token_bytes: self.max_token_bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (env, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let public_key = match (lookup("AUTH_PUBLIC_KEY_PEM"), lookup("AUTH_PUBLIC_KEY_FILE")) {
            (Some(pem), _) if !pem.trim().is_empty() => {
                PublicKeySource::Inline(pem.replace("\\n", "\n"))
            }
            (_, Some(path)) if !path.trim().is_empty() => {
                PublicKeySource::File(PathBuf::from(path.trim()))
            }
            _ => return Err(ConfigError::Missing("AUTH_PUBLIC_KEY_PEM")),
        };

        let algorithm = match lookup("AUTH_ALGORITHM") {
            Some(raw) => Algorithm::from_str(raw.trim())
                .map_err(|_| ConfigError::Invalid("AUTH_ALGORITHM"))?,
            None => KeyMaterial::DEFAULT_RSA_ALGORITHM,
        };

        let issuer = lookup("AUTH_ISSUER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let leeway_seconds = match lookup("AUTH_LEEWAY_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("AUTH_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let max_token_bytes = match lookup("AUTH_MAX_TOKEN_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("AUTH_MAX_TOKEN_BYTES"))?,
            None => VerifierOptions::default().max_token_bytes,
        };

        let verbose_diagnostics = match lookup("AUTH_VERBOSE_DIAGNOSTICS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid("AUTH_VERBOSE_DIAGNOSTICS"))?,
            None => false,
        };

        Ok(Self {
            addr,
            app_env,
            auth: AuthConfig {
                public_key,
                algorithm,
                issuer,
                leeway_seconds,
                max_token_bytes,
                verbose_diagnostics,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
