//! Shared-secret admin gate

use super::session::{SessionRecord, SessionStore};
use chrono::Utc;
use sha2::{Digest, Sha256};
use shared::ErrorCode;
use std::time::Duration;
use thiserror::Error;

/// Longest session the gate hands out
const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::SessionExpired => ErrorCode::SessionExpired,
            AuthError::NotAuthenticated => ErrorCode::NotAuthenticated,
            AuthError::Storage(_) => ErrorCode::InternalError,
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

/// Checked once on entry to the admin boundary
pub trait AdminSession: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

impl AdminSession for SessionRecord {
    fn is_authenticated(&self) -> bool {
        !self.is_expired()
    }
}

fn credential_digest(user: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares user + password against one configured pair and persists an
/// expiring session on match
pub struct SharedSecretGate {
    user: String,
    digest: String,
    ttl: chrono::Duration,
    store: SessionStore,
}

impl std::fmt::Debug for SharedSecretGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretGate")
            .field("user", &self.user)
            .field("ttl", &self.ttl)
            .field("session_file", &self.store.path())
            .finish()
    }
}

impl SharedSecretGate {
    pub fn new(
        user: impl Into<String>,
        password: &str,
        ttl: Duration,
        store: SessionStore,
    ) -> Self {
        let user = user.into();
        let ttl = ttl.min(MAX_SESSION_TTL);
        Self {
            digest: credential_digest(&user, password),
            user,
            ttl: chrono::Duration::seconds(ttl.as_secs() as i64),
            store,
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(
            config.admin_user.clone(),
            &config.admin_password,
            config.session_ttl(),
            SessionStore::new(config.session_file.clone()),
        )
    }

    /// Start a session when both values match
    pub fn login(&self, user: &str, password: &str) -> Result<SessionRecord, AuthError> {
        if credential_digest(user, password) != self.digest {
            tracing::warn!(user = %user, "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let record = SessionRecord::new(user, Utc::now(), self.ttl);
        self.store.save(&record)?;
        tracing::info!(user = %user, expires_at = %record.expires_at, "Admin session started");
        Ok(record)
    }

    /// Clear the persisted session
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.delete()?;
        tracing::info!("Admin session cleared");
        Ok(())
    }

    /// The live session, removing it once expired
    pub fn current(&self) -> Result<SessionRecord, AuthError> {
        let record = self.store.load().ok_or(AuthError::NotAuthenticated)?;
        if record.is_expired() {
            self.store.delete()?;
            tracing::info!(user = %record.user, "Admin session expired");
            return Err(AuthError::SessionExpired);
        }
        Ok(record)
    }
}

impl AdminSession for SharedSecretGate {
    fn is_authenticated(&self) -> bool {
        self.current().is_ok()
    }
}
