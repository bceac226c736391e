//! Console configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `POS_API_URL` | `http://localhost:8000/api` | REST base URL |
//! | `REQUEST_TIMEOUT_MS` | `30000` | request timeout |
//! | `SESSION_DIR` | `.pos-admin` | directory holding `session.json` |
//! | `LOG_LEVEL` | `info` | default log level (`RUST_LOG` wins) |
//! | `LOG_JSON` | `false` | JSON log output |
//! | `LOG_DIR` | unset | directory for rotating log files |

use pos_client::{ClientConfig, Session, SessionStorage};
use std::path::PathBuf;

use crate::error::AdminResult;

/// Environment variable overriding the stored session token
pub const TOKEN_ENV: &str = "POS_ADMIN_TOKEN";

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub api_url: String,
    pub request_timeout_ms: u64,
    pub session_dir: PathBuf,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("POS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            session_dir: std::env::var("SESSION_DIR")
                .unwrap_or_else(|_| ".pos-admin".into())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout_ms(self.request_timeout_ms)
    }

    pub fn session_storage(&self) -> SessionStorage {
        SessionStorage::new(&self.session_dir)
    }

    /// Session for this run: `POS_ADMIN_TOKEN` if set, else the stored one
    pub fn load_session(&self) -> AdminResult<Session> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            let session = Session::with_token(token);
            if session.is_authenticated() {
                return Ok(session);
            }
        }
        Ok(self.session_storage().load()?)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
