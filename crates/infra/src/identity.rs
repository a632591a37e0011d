//! Session identity adapter.
//!
//! The engine only needs to know who is signed in right now; registration
//! and authentication live outside this system. Hosts set the user id after
//! sign-in and clear it on sign-out.

use std::sync::RwLock;

use async_trait::async_trait;
use proxima_core::tracking::ports::Identity;
use proxima_domain::UserId;

/// Holds the current session's user id, if any.
#[derive(Default)]
pub struct SessionIdentity {
    user: RwLock<Option<UserId>>,
}

impl SessionIdentity {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user: RwLock::new(user) }
    }

    pub fn signed_in(user: impl Into<UserId>) -> Self {
        Self::new(Some(user.into()))
    }

    /// Replace the session user (sign-in / account switch).
    pub fn set_user(&self, user: Option<UserId>) {
        *self.user.write().unwrap_or_else(std::sync::PoisonError::into_inner) = user;
    }
}

#[async_trait]
impl Identity for SessionIdentity {
    async fn current_user_id(&self) -> Option<UserId> {
        self.user.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}
