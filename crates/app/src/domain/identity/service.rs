//! Identity service.

use mockall::automock;
use tokio::sync::watch;

use crate::users::UserId;

/// Signed-in state of the session, as driven by the auth adapter.
#[derive(Debug)]
pub struct SessionIdentity {
    sender: watch::Sender<Option<UserId>>,
}

impl SessionIdentity {
    /// Create a signed-out identity.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);

        Self { sender }
    }

    /// Record a sign-in.
    pub fn sign_in(&self, user: UserId) {
        self.sender.send_replace(Some(user));
    }

    /// Record a sign-out.
    pub fn sign_out(&self) {
        self.sender.send_replace(None);
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityService for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.sender.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<UserId>> {
        self.sender.subscribe()
    }
}

#[automock]
pub trait IdentityService: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;

    /// Receiver notified on every sign-in and sign-out.
    fn watch(&self) -> watch::Receiver<Option<UserId>>;
}
