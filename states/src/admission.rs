use std::sync::Arc;

use log::debug;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

use crate::Error;

/// What a [`CommandSlot`] does with a command while another one holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Admission {
    /// Fail immediately with [`Error::Busy`].
    #[default]
    Reject,
    /// Wait until the running command releases the slot.
    Queue,
}

/// Single-slot admission gate for commands that must not overlap.
#[derive(Debug, Clone)]
pub struct CommandSlot {
    policy: Admission,
    semaphore: Arc<Semaphore>,
}

/// Proof of admission. The slot is released when this is dropped.
#[derive(Debug)]
pub struct CommandPermit {
    _permit: OwnedSemaphorePermit,
}

impl CommandSlot {
    pub fn new(policy: Admission) -> Self {
        Self {
            policy,
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn policy(&self) -> Admission {
        self.policy
    }

    pub async fn admit(&self) -> Result<CommandPermit, Error> {
        let permit = match self.policy {
            Admission::Reject => match Arc::clone(&self.semaphore).try_acquire_owned() {
                Ok(permit) => permit,
                Err(TryAcquireError::NoPermits) => {
                    debug!("command rejected: slot is busy");
                    return Err(Error::Busy);
                }
                Err(TryAcquireError::Closed) => return Err(Error::Closed),
            },
            Admission::Queue => match Arc::clone(&self.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_closed) => return Err(Error::Closed),
            },
        };
        Ok(CommandPermit { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.semaphore.available_permits() == 0
    }

    /// Refuses all future admissions. Commands already admitted keep running.
    pub fn close(&self) {
        self.semaphore.close();
    }
}

impl Default for CommandSlot {
    fn default() -> Self {
        Self::new(Admission::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn reject_policy_returns_busy_while_held() {
        let slot = CommandSlot::new(Admission::Reject);

        let permit = slot.admit().await.unwrap();
        assert!(slot.is_busy());
        assert_eq!(slot.admit().await.unwrap_err(), Error::Busy);

        drop(permit);
        assert!(!slot.is_busy());
        assert!(slot.admit().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn queue_policy_waits_for_release() {
        let slot = CommandSlot::new(Admission::Queue);
        let permit = slot.admit().await.unwrap();

        let waiter = {
            let slot = slot.clone();
            tokio::spawn(async move { slot.admit().await.map(drop) })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(permit);
        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn closed_slot_refuses_admission() {
        let slot = CommandSlot::default();
        slot.close();

        assert_eq!(slot.admit().await.unwrap_err(), Error::Closed);
    }
}
