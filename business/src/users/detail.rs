//! Single-user lookup backing the detail view.
//!
//! Kept apart from [`UserStore`](crate::UserStore): loading a detail never
//! touches the cached users page. Loads are latest-only, so opening user 3
//! and then user 5 can never end up showing user 3.

use std::sync::Arc;

use log::{error, info};
use roster_states::{LatestOnly, Reducer, StateCtx, Subscription};

use crate::users::api::UsersApi;
use crate::users::model::UserRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserDetailStatus {
    #[default]
    Idle,
    Loading {
        id: u64,
    },
    Loaded(UserRecord),
    /// The remote answered 404 for this id.
    NotFound {
        id: u64,
    },
    Failed(String),
}

impl UserDetailStatus {
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Loaded(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDetailEvent {
    Loading(u64),
    Loaded(UserRecord),
    NotFound(u64),
    Failed(String),
    /// The user saved an edit of the displayed record.
    Edited(UserRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetailState {
    status: UserDetailStatus,
}

impl UserDetailState {
    pub fn status(&self) -> &UserDetailStatus {
        &self.status
    }
}

impl Reducer for UserDetailState {
    type Event = UserDetailEvent;

    fn reduce(&mut self, event: Self::Event) {
        self.status = match event {
            UserDetailEvent::Loading(id) => UserDetailStatus::Loading { id },
            UserDetailEvent::Loaded(user) => UserDetailStatus::Loaded(user),
            UserDetailEvent::NotFound(id) => UserDetailStatus::NotFound { id },
            UserDetailEvent::Failed(message) => UserDetailStatus::Failed(message),
            UserDetailEvent::Edited(user) => match &self.status {
                UserDetailStatus::Loaded(current) if current.id == user.id => {
                    UserDetailStatus::Loaded(user)
                }
                _ => return,
            },
        };
    }
}

#[derive(Debug, Clone)]
pub struct UserDetailStore {
    api: Arc<dyn UsersApi>,
    ctx: StateCtx<UserDetailState>,
    loads: Arc<LatestOnly>,
}

impl UserDetailStore {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self {
            api,
            ctx: StateCtx::default(),
            loads: Arc::new(LatestOnly::new("users.detail")),
        }
    }

    pub fn snapshot(&self) -> Arc<UserDetailState> {
        self.ctx.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<UserDetailState> {
        self.ctx.subscribe()
    }

    pub async fn load(&self, id: u64) -> Arc<UserDetailState> {
        let handle = self.loads.begin();
        let task = handle.id();
        self.ctx.dispatch(UserDetailEvent::Loading(id));
        info!("UserDetailStore: loading user {id}");

        let token = handle.cancellation_token();
        let result = tokio::select! {
            () = token.cancelled() => return self.ctx.snapshot(),
            result = self.api.get_user(id) => result,
        };

        let event = match result {
            Ok(user) => UserDetailEvent::Loaded(user),
            Err(err) if err.is_not_found() => {
                info!("UserDetailStore: user {id} not found");
                UserDetailEvent::NotFound(id)
            }
            Err(err) => {
                error!("UserDetailStore: loading user {id} failed: {err}");
                UserDetailEvent::Failed(err.to_string())
            }
        };

        let loads = &self.loads;
        self.ctx.dispatch_if(|_| loads.is_latest(task), event);
        self.loads.finish(task);
        self.ctx.snapshot()
    }

    /// Shows `user` in place of the loaded record after a saved edit.
    ///
    /// Ignored unless the loaded record has the same id.
    pub fn apply_local_edit(&self, user: UserRecord) {
        self.ctx.dispatch(UserDetailEvent::Edited(user));
    }
}
