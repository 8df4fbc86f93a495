use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flume::Sender;
use log::trace;

use crate::{Reducer, Subscription};

/// Owned, observable container for a [`Reducer`] state.
///
/// Cloning a `StateCtx` yields another handle to the same state. Readers get
/// immutable `Arc` snapshots; the only way to change the state is
/// [`StateCtx::dispatch`].
#[derive(Debug)]
pub struct StateCtx<S: Reducer> {
    inner: Arc<Inner<S>>,
}

#[derive(Debug)]
struct Inner<S> {
    current: Mutex<Arc<S>>,
    subscribers: Mutex<Vec<Sender<Arc<S>>>>,
}

impl<S: Reducer> Clone for StateCtx<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Reducer + Default> Default for StateCtx<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Reducer> StateCtx<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: Mutex::new(Arc::new(initial)),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current state. Later dispatches never mutate a snapshot already handed out.
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.current())
    }

    /// Applies `event` and returns the resulting snapshot.
    pub fn dispatch(&self, event: S::Event) -> Arc<S> {
        let mut current = self.current();
        self.apply(&mut current, event);
        Arc::clone(&current)
    }

    /// Applies `event` only if `guard` accepts the current state.
    ///
    /// The guard runs under the same lock as the transition, so nothing can
    /// slip in between the check and the write.
    pub fn dispatch_if(&self, guard: impl FnOnce(&S) -> bool, event: S::Event) -> bool {
        let mut current = self.current();
        if !guard(&current) {
            trace!("dropping guarded event {event:?}");
            return false;
        }
        self.apply(&mut current, event);
        true
    }

    /// Receives every snapshot produced after this call.
    pub fn subscribe(&self) -> Subscription<S> {
        let (send, recv) = flume::unbounded();
        self.subscribers().push(send);
        Subscription::new(recv)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    fn apply(&self, current: &mut Arc<S>, event: S::Event) {
        trace!("applying {event:?}");
        Arc::make_mut(current).reduce(event);

        // Notify while the state lock is held so subscribers observe
        // snapshots in the order they were produced.
        self.subscribers()
            .retain(|subscriber| subscriber.send(Arc::clone(current)).is_ok());
    }

    fn current(&self) -> MutexGuard<'_, Arc<S>> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<Sender<Arc<S>>>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
