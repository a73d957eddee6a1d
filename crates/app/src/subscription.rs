//! Subscription handles

use tokio::task::JoinHandle;

/// Handle to a background listener.
///
/// The listener runs until [`Subscription::unsubscribe`] is called or the handle is dropped.
#[derive(Debug)]
#[must_use = "dropping a subscription stops its listener"]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Stop the listener.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// Whether the listener is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
