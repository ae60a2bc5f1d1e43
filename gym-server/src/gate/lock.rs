//! Session lock gate
//!
//! ```text
//!            unlock(password == stored)
//!   Locked ─────────────────────────────▶ Unlocked
//!     ▲                                      │
//!     └──────────────── lock() ──────────────┘
//! ```
//!
//! Both the password and the `isAuthenticated` flag live in the local store.
//! There is no lockout and no rate limiting.

use std::sync::Arc;

use serde::Serialize;
use shared::ErrorCode;

use super::secret::SecretStore;
use super::store::KeyValueStore;
use crate::{AppError, AppResult, security_log};

pub const AUTH_FLAG_KEY: &str = "isAuthenticated";
pub const LOCK_PATH: &str = "/lock";
pub const MIN_PASSWORD_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Where a navigation request should end up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    Redirect { to: String },
}

pub struct LockGate {
    secrets: Arc<dyn SecretStore>,
    local: Arc<dyn KeyValueStore>,
    default_password: String,
}

impl LockGate {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        local: Arc<dyn KeyValueStore>,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            secrets,
            local,
            default_password: default_password.into(),
        }
    }

    /// First run: store the default password when none is set
    pub fn ensure_default_password(&self) -> AppResult<()> {
        if self.secrets.get()?.is_none() {
            self.secrets.set(&self.default_password)?;
            tracing::info!("Default dashboard password initialized");
        }
        Ok(())
    }

    /// Unreadable local state counts as locked
    pub fn state(&self) -> GateState {
        match self.local.get(AUTH_FLAG_KEY) {
            Ok(Some(flag)) if flag == "true" => GateState::Unlocked,
            Ok(_) => GateState::Locked,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read lock state");
                GateState::Locked
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.state() == GateState::Unlocked
    }

    pub fn unlock(&self, password: &str) -> AppResult<GateState> {
        if !self.password_matches(password)? {
            security_log!("WARN", "unlock_failed");
            return Err(AppError::invalid_credentials());
        }
        self.local.set(AUTH_FLAG_KEY, "true")?;
        security_log!("INFO", "unlocked");
        Ok(GateState::Unlocked)
    }

    /// Logout always succeeds
    pub fn lock(&self) -> AppResult<GateState> {
        self.local.remove(AUTH_FLAG_KEY)?;
        security_log!("INFO", "locked");
        Ok(GateState::Locked)
    }

    /// The current password must match and the new one needs at least
    /// four characters; nothing is written otherwise.
    pub fn change_password(&self, current: &str, new_password: &str) -> AppResult<()> {
        if !self.password_matches(current)? {
            security_log!("WARN", "password_change_rejected");
            return Err(AppError::new(ErrorCode::PasswordMismatch));
        }
        if new_password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::new(ErrorCode::PasswordTooShort)
                .with_detail("min_length", MIN_PASSWORD_CHARS));
        }
        self.secrets.set(new_password)?;
        security_log!("INFO", "password_changed");
        Ok(())
    }

    /// Every view other than the lock view needs the gate open
    pub fn route(&self, path: &str) -> RouteDecision {
        let is_lock_view = path == LOCK_PATH;
        match (self.state(), is_lock_view) {
            (GateState::Locked, false) => RouteDecision::Redirect {
                to: LOCK_PATH.to_string(),
            },
            (GateState::Unlocked, true) => RouteDecision::Redirect { to: "/".to_string() },
            _ => RouteDecision::Allow,
        }
    }

    // plaintext comparison
    fn password_matches(&self, candidate: &str) -> AppResult<bool> {
        let stored = match self.secrets.get()? {
            Some(stored) => stored,
            None => self.default_password.clone(),
        };
        Ok(stored == candidate)
    }
}
