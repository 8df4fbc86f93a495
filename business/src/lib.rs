//! Business layer of the roster console.
//!
//! Holds everything between the UI and the network:
//! - [`UserStore`]: the cached users page and its fetch/create/update/delete commands
//! - [`UserDetailStore`]: single-user lookup for the detail view
//! - [`UsersApi`] / [`RemoteUsersApi`]: the remote collection client
//! - [`LoginGate`]: the cosmetic login flag
//! - [`BusinessConfig`]: API location, key, page size and login pair

pub mod config;
pub mod http;
pub mod login_state;
pub mod users;

#[cfg(test)]
mod test_utils;

pub use config::{
    API_KEY_HEADER, BusinessConfig, Credentials, DEFAULT_API_BASE_URL, DEFAULT_API_KEY,
    DEFAULT_PER_PAGE,
};
pub use login_state::{AuthStatus, INVALID_CREDENTIALS, LoginGate};
pub use users::{
    ApiError, ApiResult, CommandKind, DraftError, RefreshPolicy, RemoteUsersApi, RequestStatus,
    SingleUser, StoreError, UserDetailEvent, UserDetailState, UserDetailStatus, UserDetailStore,
    UserDraft, UserEvent, UserPage, UserRecord, UserStore, UserStoreOptions, UserStoreState,
    UsersApi,
};

pub use roster_states::{Admission, Reducer, Subscription};
