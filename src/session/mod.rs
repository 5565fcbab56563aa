//! Who is logged in.
//!
//! The session only changes through [`Session::set_user`] and
//! [`Session::clear_user`]. Everything else reads snapshots or waits for
//! changes through [`Session::subscribe`].

pub mod auth;

pub use auth::{on_auth_callback, redirect_target, AuthWidgetConfig};

use crate::models::UserProfile;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email_address.as_str())
    }
}

/// Shared, observable session store. Clones share the same state.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Login transition
    pub fn set_user(&self, user: UserProfile) {
        info!("👤 Logged in as {}", user.email_address);
        self.tx.send_replace(SessionState {
            is_authenticated: true,
            user: Some(user),
        });
    }

    /// Logout or failed-login transition
    pub fn clear_user(&self) {
        if self.tx.borrow().is_authenticated {
            info!("Logged out");
        }
        self.tx.send_replace(SessionState::default());
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    pub fn user_email(&self) -> Option<String> {
        self.tx.borrow().email().map(str::to_string)
    }

    /// Receiver that is notified after every transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
