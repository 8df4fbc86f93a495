use std::sync::Arc;

use flume::Receiver;

/// Receiving end of [`StateCtx::subscribe`](crate::StateCtx::subscribe).
///
/// Dropping the subscription unregisters it on the next dispatch.
#[derive(Debug)]
pub struct Subscription<S> {
    recv: Receiver<Arc<S>>,
}

impl<S> Subscription<S> {
    pub(crate) fn new(recv: Receiver<Arc<S>>) -> Self {
        Self { recv }
    }

    /// Newest pending snapshot, discarding the ones before it.
    pub fn try_latest(&self) -> Option<Arc<S>> {
        self.recv.try_iter().last()
    }

    /// All pending snapshots, oldest first.
    pub fn drain(&self) -> Vec<Arc<S>> {
        self.recv.try_iter().collect()
    }

    /// Waits for the next snapshot. Returns `None` once the context is gone.
    pub async fn changed(&self) -> Option<Arc<S>> {
        self.recv.recv_async().await.ok()
    }
}
