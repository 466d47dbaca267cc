//! Application settings loaded via OrthoConfig.
//!
//! Every field can be set through `YOGA_*` environment variables, a
//! configuration file, or command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_EXPIRATION_MS: i64 = 86_400_000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("failed to read JWT secret at {path}: {message}")]
    SecretFile { path: String, message: String },
    #[error("JWT secret is empty")]
    EmptySecret,
    #[error(
        "no JWT secret configured; set YOGA_JWT_SECRET or YOGA_JWT_SECRET_FILE \
         (or YOGA_ALLOW_EPHEMERAL_SECRET=1 for development)"
    )]
    MissingSecret,
    #[error("JWT expiration must be positive, got {0} ms")]
    InvalidExpiration(i64),
}

/// Values controlling the HTTP listener, storage and token signing.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "YOGA")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Inline HMAC secret for signing tokens.
    pub jwt_secret: Option<String>,
    /// File holding the HMAC secret. Ignored when `jwt_secret` is set.
    pub jwt_secret_file: Option<PathBuf>,
    /// Token lifetime in milliseconds.
    pub jwt_expiration_ms: Option<i64>,
    /// Upper bound of the database pool.
    pub db_max_connections: Option<u32>,
    /// Allow a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

/// Signing secret and where it came from.
pub struct ResolvedSecret {
    pub bytes: Zeroizing<Vec<u8>>,
    pub ephemeral: bool,
}

impl AppSettings {
    /// Parse the listener address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Token lifetime, one day unless configured.
    pub fn jwt_expiration_ms(&self) -> Result<i64, SettingsError> {
        match self.jwt_expiration_ms {
            None => Ok(DEFAULT_JWT_EXPIRATION_MS),
            Some(ms) if ms > 0 => Ok(ms),
            Some(ms) => Err(SettingsError::InvalidExpiration(ms)),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Resolve the signing secret: inline value, then file, then a random
    /// secret when `debug_build` or `allow_ephemeral_secret` permits it.
    pub fn resolve_jwt_secret(&self, debug_build: bool) -> Result<ResolvedSecret, SettingsError> {
        let configured = match (&self.jwt_secret, &self.jwt_secret_file) {
            (Some(secret), _) => Some(Zeroizing::new(secret.as_bytes().to_vec())),
            (None, Some(path)) => Some(Zeroizing::new(std::fs::read(path).map_err(|err| {
                SettingsError::SecretFile {
                    path: path.display().to_string(),
                    message: err.to_string(),
                }
            })?)),
            (None, None) => None,
        };

        match configured {
            Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {
                Err(SettingsError::EmptySecret)
            }
            Some(bytes) => Ok(ResolvedSecret {
                bytes,
                ephemeral: false,
            }),
            None if debug_build || self.allow_ephemeral_secret => {
                let mut bytes = Zeroizing::new(vec![0u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(bytes.as_mut_slice());
                Ok(ResolvedSecret {
                    bytes,
                    ephemeral: true,
                })
            }
            None => Err(SettingsError::MissingSecret),
        }
    }
}
