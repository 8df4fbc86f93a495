//! Store wiring shared by every command.

use std::sync::Arc;

use roster_business::{
    BusinessConfig, LoginGate, RemoteUsersApi, UserDetailStore, UserStore, UserStoreOptions,
    UsersApi,
};
use tracing::{debug, instrument};

/// The stores one CLI invocation works with. Both stores talk to the same
/// API client.
pub struct AppContext {
    pub config: BusinessConfig,
    pub users: UserStore,
    pub detail: UserDetailStore,
    pub login: LoginGate,
}

impl AppContext {
    #[instrument(skip_all, name = "build_context", fields(api = %config.api_base_url))]
    pub fn new(config: BusinessConfig) -> Self {
        let api: Arc<dyn UsersApi> = Arc::new(RemoteUsersApi::new(config.clone()));
        debug!(per_page = config.per_page, "building stores");

        Self {
            users: UserStore::new(Arc::clone(&api), UserStoreOptions::from_config(&config)),
            detail: UserDetailStore::new(api),
            login: LoginGate::new(config.credentials.clone()),
            config,
        }
    }

    /// Stop accepting writes and drop any fetch still in flight.
    pub fn shutdown(&self) {
        self.users.close();
    }
}
