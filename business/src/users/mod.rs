//! Users domain module.
//!
//! - `model`: wire/cache types
//! - `api`: the remote API seam and its HTTP implementation
//! - `state`: the cached page and its reducer
//! - `store`: the commands (fetch/create/update/delete)
//! - `detail`: single-user lookup for the detail view
//!
//! UI code reads snapshots and calls store commands; it never builds events.

pub mod api;
pub mod detail;
pub mod model;
pub mod state;
pub mod store;

pub use api::{ApiError, ApiResult, RemoteUsersApi, UsersApi};
pub use detail::{UserDetailEvent, UserDetailState, UserDetailStatus, UserDetailStore};
pub use model::{DraftError, SingleUser, UserDraft, UserPage, UserRecord};
pub use state::{CommandKind, RequestStatus, UserEvent, UserStoreState};
pub use store::{RefreshPolicy, StoreError, UserStore, UserStoreOptions};
