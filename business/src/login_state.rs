//! Cosmetic login gate.
//!
//! This is a placeholder, not authentication: it compares what the user typed
//! against one configured credential pair and flips a flag. There is no
//! token, no expiry, no server round-trip and nothing is persisted. The flag
//! does not gate any [`UserStore`](crate::UserStore) command; the UI only uses
//! it to decide what to show.

use log::{info, warn};

use crate::config::Credentials;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
    /// Last attempt did not match the configured pair.
    Rejected(String),
}

impl AuthStatus {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { username } => Some(username.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginGate {
    credentials: Credentials,
    status: AuthStatus,
}

impl LoginGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            status: AuthStatus::LoggedOut,
        }
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn is_logged_in(&self) -> bool {
        self.status.is_logged_in()
    }

    /// Returns whether the pair matched.
    pub fn attempt(&mut self, username: &str, password: &str) -> bool {
        if username == self.credentials.username && password == self.credentials.password {
            info!("LoginGate: logged in as {username}");
            self.status = AuthStatus::LoggedIn {
                username: username.to_owned(),
            };
            true
        } else {
            warn!("LoginGate: rejected login attempt for {username:?}");
            self.status = AuthStatus::Rejected(INVALID_CREDENTIALS.to_owned());
            false
        }
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.status.username() {
            info!("LoginGate: {username} logged out");
        }
        self.status = AuthStatus::LoggedOut;
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}
