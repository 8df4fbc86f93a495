//! Remote users API client.
//!
//! [`UsersApi`] is the seam between the stores and the network: the stores
//! only ever talk to `Arc<dyn UsersApi>`, and [`RemoteUsersApi`] is the
//! production implementation over [`crate::http::Client`].
//!
//! Endpoints (relative to `BusinessConfig::api_base_url`):
//! - `GET    /users?page={n}&per_page={k}`
//! - `GET    /users/{id}`
//! - `POST   /users`        body `{first_name, last_name, email}`
//! - `PUT    /users/{id}`   body: the full record
//! - `DELETE /users/{id}`
//!
//! Write responses are checked for a 2xx status only. Their bodies are not
//! decoded; the public mock echoes the input with string ids and timestamps.

use std::fmt::Debug;

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use crate::config::{API_KEY_HEADER, BusinessConfig};
use crate::http::{Client, HttpError, Response};
use crate::users::model::{SingleUser, UserDraft, UserPage, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// The server answered with a non-2xx status.
    #[error("API returned status: {status}")]
    RemoteRejection { status: u16 },
    /// A 2xx response whose body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RemoteRejection { status: 404 })
    }

    /// Short label of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkFailure(_) => "network_failure",
            Self::RemoteRejection { .. } => "remote_rejection",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::NetworkFailure(err.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait UsersApi: Send + Sync + Debug {
    async fn list_users(&self, page: u32, per_page: u32) -> ApiResult<UserPage>;

    async fn get_user(&self, id: u64) -> ApiResult<UserRecord>;

    async fn create_user(&self, draft: &UserDraft) -> ApiResult<()>;

    async fn update_user(&self, record: &UserRecord) -> ApiResult<()>;

    async fn delete_user(&self, id: u64) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct RemoteUsersApi {
    config: BusinessConfig,
    client: Client,
}

impl RemoteUsersApi {
    pub fn new(config: BusinessConfig) -> Self {
        let client = match config.api_key() {
            Some(key) => Client::new().with_default_header(API_KEY_HEADER, key),
            None => Client::new(),
        };
        Self { config, client }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }
}

fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::RemoteRejection {
            status: response.status,
        })
    }
}

fn serialize_error(err: &serde_json::Error) -> ApiError {
    // Nothing was sent, so the closest bucket is a local transport failure.
    ApiError::NetworkFailure(format!("Failed to serialize request: {err}"))
}

#[async_trait]
impl UsersApi for RemoteUsersApi {
    async fn list_users(&self, page: u32, per_page: u32) -> ApiResult<UserPage> {
        let response = self
            .client
            .get(self.config.users_url())
            .query("page", page)
            .query("per_page", per_page)
            .send()
            .await?;

        ensure_success(response)?.json::<UserPage>().map_err(|e| {
            ApiError::MalformedResponse(format!("Failed to parse users page: {e}"))
        })
    }

    async fn get_user(&self, id: u64) -> ApiResult<UserRecord> {
        let response = self.client.get(self.config.user_url(id)).send().await?;

        ensure_success(response)?
            .json::<SingleUser>()
            .map(|single| single.data)
            .map_err(|e| ApiError::MalformedResponse(format!("Failed to parse user: {e}")))
    }

    async fn create_user(&self, draft: &UserDraft) -> ApiResult<()> {
        let request = self
            .client
            .post(self.config.users_url())
            .json(draft)
            .map_err(|e| serialize_error(&e))?;

        let response = ensure_success(request.send().await?)?;
        debug!(
            "create_user: accepted with status {} ({} byte body)",
            response.status,
            response.body.len()
        );
        Ok(())
    }

    async fn update_user(&self, record: &UserRecord) -> ApiResult<()> {
        let request = self
            .client
            .put(self.config.user_url(record.id))
            .json(record)
            .map_err(|e| serialize_error(&e))?;

        let response = ensure_success(request.send().await?)?;
        debug!(
            "update_user {}: accepted with status {}",
            record.id, response.status
        );
        Ok(())
    }

    async fn delete_user(&self, id: u64) -> ApiResult<()> {
        let response = self.client.delete(self.config.user_url(id)).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
