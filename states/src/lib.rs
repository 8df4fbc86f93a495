//! State plumbing shared by the roster crates.
//!
//! Domain crates describe their state as a [`Reducer`] and keep it inside a
//! [`StateCtx`]. Commands run outside the context and only ever feed events
//! back in, so every transition goes through one place and readers see whole
//! snapshots.
//!
//! Two helpers cover the async side:
//! - [`LatestOnly`] hands out [`TaskHandle`]s with increasing generations and
//!   cancels the task a new one supersedes.
//! - [`CommandSlot`] admits one command at a time, either rejecting or queueing
//!   the rest according to its [`Admission`] policy.

mod admission;
mod ctx;
mod error;
mod reducer;
mod subscription;
mod task;

pub use admission::{Admission, CommandPermit, CommandSlot};
pub use ctx::StateCtx;
pub use error::Error;
pub use reducer::Reducer;
pub use subscription::Subscription;
pub use task::{LatestOnly, TaskHandle, TaskId};
