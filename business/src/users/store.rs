//! The user store: cached users page plus the commands that change it.
//!
//! Every command follows the same shape:
//! 1. (writes only) take the single write slot, or fail with [`StoreError::Busy`]
//! 2. dispatch `Started`
//! 3. await the one remote call
//! 4. reconcile: a fetch replaces the cache, a write triggers the refresh
//!    step described by [`RefreshPolicy`], a failure records its message
//!
//! Remote failures never surface as `Err`: they end up in
//! [`UserStoreState::last_error`] with status `Failed`.
//!
//! Fetches are latest-only. Starting a fetch cancels the one in flight, and a
//! response that arrives after a newer fetch started is dropped, so the cache
//! always reflects the most recently issued fetch. A fetch cancelled by
//! [`UserStore::close`] has no successor and ends as `Failed`.
//!
//! Every write picks the page it reloads from the snapshot taken when it is
//! issued. Navigating while the write waits on the remote does not move it.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info};
use roster_states::{Admission, CommandSlot, LatestOnly, StateCtx, Subscription};
use thiserror::Error;

use crate::config::BusinessConfig;
use crate::users::api::{ApiError, RemoteUsersApi, UsersApi};
use crate::users::model::{UserDraft, UserRecord};
use crate::users::state::{CommandKind, UserEvent, UserStoreState};

/// What a write does once the remote accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Reload the affected page from the remote.
    #[default]
    AfterWrite,
    /// Mark the write as succeeded and leave the cache as it is.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStoreOptions {
    pub per_page: u32,
    pub refresh: RefreshPolicy,
    pub admission: Admission,
}

impl Default for UserStoreOptions {
    fn default() -> Self {
        Self {
            per_page: crate::config::DEFAULT_PER_PAGE,
            refresh: RefreshPolicy::default(),
            admission: Admission::default(),
        }
    }
}

impl UserStoreOptions {
    pub fn from_config(config: &BusinessConfig) -> Self {
        Self {
            per_page: config.per_page.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    #[must_use]
    pub fn with_admission(mut self, admission: Admission) -> Self {
        self.admission = admission;
        self
    }
}

/// Why a write command was not run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("another write is still in flight")]
    Busy,
    #[error("the store no longer accepts writes")]
    Closed,
}

impl From<roster_states::Error> for StoreError {
    fn from(err: roster_states::Error) -> Self {
        match err {
            roster_states::Error::Busy => Self::Busy,
            roster_states::Error::Closed => Self::Closed,
        }
    }
}

/// Handle to the users cache. Clones share the same state.
#[derive(Debug, Clone)]
pub struct UserStore {
    api: Arc<dyn UsersApi>,
    ctx: StateCtx<UserStoreState>,
    fetches: Arc<LatestOnly>,
    writes: CommandSlot,
    options: UserStoreOptions,
}

impl UserStore {
    pub fn new(api: Arc<dyn UsersApi>, options: UserStoreOptions) -> Self {
        Self {
            api,
            ctx: StateCtx::default(),
            fetches: Arc::new(LatestOnly::new("users.fetch")),
            writes: CommandSlot::new(options.admission),
            options,
        }
    }

    /// Store backed by [`RemoteUsersApi`] with options taken from `config`.
    pub fn from_config(config: &BusinessConfig) -> Self {
        Self::new(
            Arc::new(RemoteUsersApi::new(config.clone())),
            UserStoreOptions::from_config(config),
        )
    }

    pub fn snapshot(&self) -> Arc<UserStoreState> {
        self.ctx.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<UserStoreState> {
        self.ctx.subscribe()
    }

    pub fn options(&self) -> UserStoreOptions {
        self.options
    }

    pub fn is_write_in_flight(&self) -> bool {
        self.writes.is_busy()
    }

    /// Loads `page`, or the current page when `None`.
    ///
    /// Pages past the end are forwarded as-is; whatever the remote answers
    /// (typically an empty page) is accepted.
    pub async fn fetch(&self, page: Option<u32>) -> Arc<UserStoreState> {
        let page = page.unwrap_or_else(|| self.ctx.snapshot().current_page());
        self.load_page(page, UserEvent::Started(CommandKind::Fetch))
            .await;
        self.ctx.snapshot()
    }

    /// Creates a user, then reloads the page that was current when it was issued.
    ///
    /// The creation response is never merged into the cache; whatever the
    /// reload returns is what the cache holds afterwards.
    pub async fn create(&self, draft: UserDraft) -> Result<Arc<UserStoreState>, StoreError> {
        let _permit = self.writes.admit().await?;
        let page = self.ctx.snapshot().current_page();
        self.ctx.dispatch(UserEvent::Started(CommandKind::Create));
        info!(
            "UserStore: creating user {} {}",
            draft.first_name, draft.last_name
        );

        match self.api.create_user(&draft).await {
            Ok(()) => self.after_write(CommandKind::Create, page).await,
            Err(err) => self.fail(CommandKind::Create, &err),
        }
        Ok(self.ctx.snapshot())
    }

    /// Replaces the user `record.id` with `record`, then reloads the page that
    /// was current when it was issued.
    pub async fn update(&self, record: UserRecord) -> Result<Arc<UserStoreState>, StoreError> {
        let _permit = self.writes.admit().await?;
        let page = self.ctx.snapshot().current_page();
        self.ctx.dispatch(UserEvent::Started(CommandKind::Update));
        info!("UserStore: updating user {}", record.id);

        match self.api.update_user(&record).await {
            Ok(()) => self.after_write(CommandKind::Update, page).await,
            Err(err) => self.fail(CommandKind::Update, &err),
        }
        Ok(self.ctx.snapshot())
    }

    /// Deletes user `id`, then reloads the page it was deleted from, or the
    /// page before it when the deleted record was that page's only one.
    pub async fn delete(&self, id: u64) -> Result<Arc<UserStoreState>, StoreError> {
        let _permit = self.writes.admit().await?;
        let target = self.ctx.snapshot().refresh_target_after_delete();
        self.ctx.dispatch(UserEvent::Started(CommandKind::Delete));
        info!("UserStore: deleting user {id}");

        match self.api.delete_user(id).await {
            Ok(()) => self.after_write(CommandKind::Delete, target).await,
            Err(err) => self.fail(CommandKind::Delete, &err),
        }
        Ok(self.ctx.snapshot())
    }

    /// Stops accepting writes and cancels the running fetch. Writes already
    /// admitted run to completion.
    pub fn close(&self) {
        self.writes.close();
        self.fetches.cancel_all();
    }

    async fn after_write(&self, kind: CommandKind, page: u32) {
        match self.options.refresh {
            RefreshPolicy::AfterWrite => {
                debug!("UserStore: {kind} accepted, refreshing page {page}");
                self.load_page(page, UserEvent::Refreshing(kind)).await;
            }
            RefreshPolicy::Disabled => {
                debug!("UserStore: {kind} accepted, refresh disabled");
                self.ctx.dispatch(UserEvent::WriteAccepted(kind));
            }
        }
    }

    /// `start` is the event announcing the fetch: a plain `Started(Fetch)`,
    /// or `Refreshing` when a write hands over to its reload.
    async fn load_page(&self, page: u32, start: UserEvent) {
        let handle = self.fetches.begin();
        let id = handle.id();
        self.ctx.dispatch(start);
        info!(
            "UserStore: fetching page {page} (generation {})",
            id.generation()
        );

        let fetches = &self.fetches;
        let token = handle.cancellation_token();
        let result = tokio::select! {
            () = token.cancelled() => {
                let cancelled = UserEvent::Failed {
                    kind: CommandKind::Fetch,
                    message: "fetch cancelled".to_owned(),
                };
                if self.ctx.dispatch_if(|_| fetches.is_latest(id), cancelled) {
                    info!("UserStore: fetch generation {} cancelled", id.generation());
                } else {
                    debug!("UserStore: fetch generation {} superseded", id.generation());
                }
                return;
            }
            result = self.api.list_users(page, self.options.per_page) => result,
        };

        let event = match result {
            Ok(loaded) => {
                info!(
                    "UserStore: page {} loaded with {} of {} users",
                    loaded.page,
                    loaded.data.len(),
                    loaded.total
                );
                UserEvent::PageLoaded {
                    page: loaded,
                    at: Utc::now(),
                }
            }
            Err(err) => {
                error!("UserStore: fetch failed ({}): {err}", err.kind());
                UserEvent::Failed {
                    kind: CommandKind::Fetch,
                    message: err.to_string(),
                }
            }
        };

        if !self.ctx.dispatch_if(|_| fetches.is_latest(id), event) {
            debug!(
                "UserStore: dropping stale result of generation {}",
                id.generation()
            );
        }
        self.fetches.finish(id);
    }

    fn fail(&self, kind: CommandKind, err: &ApiError) {
        error!("UserStore: {kind} failed ({}): {err}", err.kind());
        self.ctx.dispatch(UserEvent::Failed {
            kind,
            message: err.to_string(),
        });
    }
}
