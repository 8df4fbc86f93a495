use std::fmt::Debug;

/// A state value that changes only by folding events into itself.
///
/// `reduce` must be a pure in-memory transition: no IO, no awaiting. Side
/// effects belong to the command that produced the event.
pub trait Reducer: Clone + Debug + Send + Sync + 'static {
    type Event: Debug + Send;

    fn reduce(&mut self, event: Self::Event);
}
