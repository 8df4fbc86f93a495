//! Task identity and cooperative cancellation for latest-only commands.
//!
//! A [`LatestOnly`] tracker belongs to one kind of command (for example
//! "fetch the users page"). Each [`LatestOnly::begin`] call produces a
//! [`TaskHandle`] with a higher generation and cancels the handle it replaces.
//! A task that finishes late can ask [`LatestOnly::is_latest`] before applying
//! its result, so a superseded response never overwrites a newer one.
//!
//! ```ignore
//! let handle = tracker.begin();
//! tokio::select! {
//!     () = handle.cancellation_token().cancelled() => return,
//!     result = do_request() => {
//!         ctx.dispatch_if(|_| tracker.is_latest(handle.id()), result.into());
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use log::debug;
use tokio_util::sync::CancellationToken;

/// Identifies one run of a tracked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    label: &'static str,
    generation: u64,
}

impl TaskId {
    pub fn new(label: &'static str, generation: u64) -> Self {
        Self { label, generation }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Higher generations were started later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A started task together with the token used to cancel it.
///
/// Cancellation is cooperative: the task must await
/// [`CancellationToken::cancelled`] or poll [`TaskHandle::is_cancelled`].
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Generation counter that keeps only the newest task of one kind alive.
#[derive(Debug)]
pub struct LatestOnly {
    label: &'static str,
    generation: AtomicU64,
    running: Mutex<Option<TaskHandle>>,
}

impl LatestOnly {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            generation: AtomicU64::new(0),
            running: Mutex::new(None),
        }
    }

    /// Starts a new generation and cancels the task it supersedes.
    pub fn begin(&self) -> TaskHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = TaskHandle::new(
            TaskId::new(self.label, generation),
            CancellationToken::new(),
        );

        let superseded = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle.clone());

        if let Some(previous) = superseded {
            debug!(
                "{}: generation {} supersedes {}",
                self.label,
                generation,
                previous.id().generation()
            );
            previous.cancel();
        }

        handle
    }

    pub fn is_latest(&self, id: TaskId) -> bool {
        self.generation.load(Ordering::SeqCst) == id.generation()
    }

    /// Forgets `id` if it is still the running task.
    pub fn finish(&self, id: TaskId) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.as_ref().is_some_and(|handle| handle.id() == id) {
            *running = None;
        }
    }

    /// Cancels whatever is running without starting anything new.
    pub fn cancel_all(&self) {
        if let Some(handle) = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
