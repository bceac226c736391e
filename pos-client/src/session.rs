//! Session - bearer token and its decoded claims
//!
//! The token is persisted as JSON in the client's session directory and
//! loaded once at start-up. Claims are decoded for display only; the
//! signature is never verified here.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;

/// Session file name inside the session directory
pub const SESSION_FILE: &str = "session.json";

/// Authenticated session passed to every API-calling component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session without a token (requests are sent without Authorization)
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session carrying a bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Decoded token payload, if the token is a readable JWT
    pub fn claims(&self) -> Option<TokenClaims> {
        self.token.as_deref().and_then(TokenClaims::decode)
    }
}

/// Claims read from the JWT payload (unverified)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Subject, usually the employee id (string or number)
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub exp: Option<u64>,
}

impl TokenClaims {
    /// Decode the payload segment of `header.payload.signature`
    pub fn decode(token: &str) -> Option<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let payload = URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&payload).ok()
    }

    /// Employee id from `employee_id`, falling back to a numeric `sub`
    pub fn employee_id(&self) -> Option<i64> {
        self.employee_id.or_else(|| match &self.sub {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        })
    }

    pub fn is_expired(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| now_secs > exp)
    }
}

/// JSON file storage for the session token
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            path: base_path.into().join(SESSION_FILE),
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored session; a missing file is an anonymous session
    pub fn load(&self) -> ClientResult<Session> {
        if !self.path.exists() {
            return Ok(Session::anonymous());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn delete(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
