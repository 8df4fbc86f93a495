//! Cached users page and its request lifecycle.
//!
//! `UserStoreState` is only ever changed by folding a [`UserEvent`] into it
//! (see the [`Reducer`] impl). Fields are private; the UI reads them through
//! getters on a snapshot.
//!
//! Lifecycle per command: `Idle -> Pending -> Succeeded | Failed`, and the next
//! command re-enters `Pending`.
//!
//! A fetch may run while a write is waiting on the remote. The pending write
//! and the pending fetch are tracked apart: a success only settles the status
//! once nothing else is in flight, while a failure is reported as soon as it
//! lands.

use std::fmt;

use chrono::{DateTime, Utc};
use roster_states::Reducer;

use crate::users::model::{UserPage, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// The store commands, as tracked in the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Fetch,
    Create,
    Update,
    Delete,
}

impl CommandKind {
    pub fn is_write(self) -> bool {
        !matches!(self, Self::Fetch)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// A command issued its remote call.
    Started(CommandKind),
    /// The remote accepted a write and the reload of the page begins.
    Refreshing(CommandKind),
    /// A list request succeeded; carries the whole envelope.
    PageLoaded {
        page: UserPage,
        at: DateTime<Utc>,
    },
    /// A write succeeded and no refresh follows it.
    WriteAccepted(CommandKind),
    Failed {
        kind: CommandKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStoreState {
    records: Vec<UserRecord>,
    request_status: RequestStatus,
    last_error: Option<String>,
    current_page: u32,
    total_pages: u32,
    total_records: u64,
    pending_write: Option<CommandKind>,
    fetch_pending: bool,
    last_command: Option<CommandKind>,
    last_synced_at: Option<DateTime<Utc>>,
}

impl Default for UserStoreState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            request_status: RequestStatus::Idle,
            last_error: None,
            current_page: 1,
            total_pages: 1,
            total_records: 0,
            pending_write: None,
            fetch_pending: false,
            last_command: None,
            last_synced_at: None,
        }
    }
}

impl UserStoreState {
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn request_status(&self) -> RequestStatus {
        self.request_status
    }

    /// Present only while the status is `Failed`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Command currently waiting on the remote, if any. A pending write
    /// outranks a fetch running beside it.
    pub fn in_flight(&self) -> Option<CommandKind> {
        self.pending_write
            .or(self.fetch_pending.then_some(CommandKind::Fetch))
    }

    /// Command whose completion produced the current status.
    pub fn last_command(&self) -> Option<CommandKind> {
        self.last_command
    }

    /// When `records` was last replaced by a successful fetch.
    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    pub fn is_pending(&self) -> bool {
        self.request_status == RequestStatus::Pending
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn find(&self, id: u64) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Page to reload after deleting a record from the cached page.
    ///
    /// Removing the only record of a page past the first would leave that
    /// page empty, so step back one page in that case.
    pub fn refresh_target_after_delete(&self) -> u32 {
        if self.records.len() == 1 && self.current_page > 1 {
            self.current_page - 1
        } else {
            self.current_page
        }
    }

    /// Marks `kind` as succeeded unless another command is still pending.
    fn settle(&mut self, kind: CommandKind) {
        if self.in_flight().is_some() {
            return;
        }
        self.request_status = RequestStatus::Succeeded;
        self.last_error = None;
        self.last_command = Some(kind);
    }
}

impl Reducer for UserStoreState {
    type Event = UserEvent;

    fn reduce(&mut self, event: Self::Event) {
        match event {
            UserEvent::Started(kind) => {
                if kind.is_write() {
                    self.pending_write = Some(kind);
                } else {
                    self.fetch_pending = true;
                }
                self.request_status = RequestStatus::Pending;
                self.last_error = None;
            }
            UserEvent::Refreshing(_) => {
                self.pending_write = None;
                self.fetch_pending = true;
                self.request_status = RequestStatus::Pending;
                self.last_error = None;
            }
            UserEvent::PageLoaded { page, at } => {
                // Records and pagination move together.
                self.records = page.data;
                self.current_page = page.page.max(1);
                self.total_pages = page.total_pages.max(1);
                self.total_records = page.total;
                self.last_synced_at = Some(at);

                self.fetch_pending = false;
                self.settle(CommandKind::Fetch);
            }
            UserEvent::WriteAccepted(kind) => {
                self.pending_write = None;
                self.settle(kind);
            }
            UserEvent::Failed { kind, message } => {
                if kind.is_write() {
                    self.pending_write = None;
                } else {
                    self.fetch_pending = false;
                }
                self.request_status = RequestStatus::Failed;
                self.last_error = Some(message);
                self.last_command = Some(kind);
            }
        }
    }
}
