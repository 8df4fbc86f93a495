use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("another command is already in flight")]
    Busy,
    #[error("command slot has been closed")]
    Closed,
}
