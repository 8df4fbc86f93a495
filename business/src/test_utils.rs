//! Test utilities for exercising the stores against a mock users API.
//!
//! # Example
//!
//! ```ignore
//! let test_ctx = TestContext::new().await;
//! test_ctx.mock_list_users(1, 2, 12, vec![sample_user(1)]).await;
//!
//! let store = test_ctx.user_store(RefreshPolicy::AfterWrite);
//! let state = store.fetch(Some(1)).await;
//! assert_eq!(state.records().len(), 1);
//! ```

use std::sync::Arc;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::users::{RefreshPolicy, RemoteUsersApi, UserRecord, UserStore, UserStoreOptions};
use crate::{API_KEY_HEADER, BusinessConfig, UserDetailStore};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_PER_PAGE: u32 = 6;

/// Holds a mock server and a config pointing at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub config: BusinessConfig,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        // Mirror the real layout: the users collection lives under /api.
        let config = BusinessConfig::new(format!("{}/api", mock_server.uri()))
            .with_api_key(Some(TEST_API_KEY.to_owned()))
            .with_per_page(TEST_PER_PAGE);

        Self {
            mock_server,
            config,
        }
    }

    pub fn api(&self) -> Arc<RemoteUsersApi> {
        Arc::new(RemoteUsersApi::new(self.config.clone()))
    }

    pub fn user_store(&self, refresh: RefreshPolicy) -> UserStore {
        UserStore::new(
            self.api(),
            UserStoreOptions::from_config(&self.config).with_refresh(refresh),
        )
    }

    pub fn detail_store(&self) -> UserDetailStore {
        UserDetailStore::new(self.api())
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
    }

    /// `page` query values of every list request received so far.
    pub async fn fetched_pages(&self) -> Vec<u32> {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/api/users")
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "page")
                    .and_then(|(_, v)| v.parse().ok())
            })
            .collect()
    }

    // =========================================================================
    // Mock endpoint helpers
    // =========================================================================

    /// Mock `GET /api/users?page={page}`.
    pub async fn mock_list_users(
        &self,
        page: u32,
        total_pages: u32,
        total: u64,
        users: Vec<UserRecord>,
    ) {
        let response = ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": page,
            "per_page": TEST_PER_PAGE,
            "total": total,
            "total_pages": total_pages,
            "data": users,
            "support": {
                "url": "https://reqres.in/#support-heading",
                "text": "Tired of writing endless social media content?"
            }
        }));

        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", TEST_PER_PAGE.to_string()))
            .and(header(API_KEY_HEADER, TEST_API_KEY))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    /// Mock `GET /api/users?page={page}` answering with `status`.
    pub async fn mock_list_users_error(&self, page: u32, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": "something went wrong"
            })))
            .mount(&self.mock_server)
            .await;
    }

    /// Mock `GET /api/users?page={page}` answering 200 with a body that is not an envelope.
    pub async fn mock_list_users_malformed(&self, page: u32) {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "users": [] })),
            )
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_get_user(&self, user: &UserRecord) {
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{}", user.id)))
            .and(header(API_KEY_HEADER, TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": user,
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_get_user_not_found(&self, id: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{id}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({})))
            .mount(&self.mock_server)
            .await;
    }

    /// Mock `POST /api/users` the way the public mock answers: an echo with
    /// a string id and a timestamp, and nothing persisted.
    pub async fn mock_create_user(&self) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(header(API_KEY_HEADER, TEST_API_KEY))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "853",
                "createdAt": "2026-10-16T09:30:00.000Z"
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_create_user_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_update_user(&self, id: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/users/{id}")))
            .and(header(API_KEY_HEADER, TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "updatedAt": "2026-10-16T09:30:00.000Z"
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_update_user_error(&self, id: u64, status: u16) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/users/{id}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_delete_user(&self, id: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/users/{id}")))
            .and(header(API_KEY_HEADER, TEST_API_KEY))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_delete_user_error(&self, id: u64, status: u16) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/users/{id}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }
}

/// A user shaped like the public mock's seed data.
pub fn sample_user(id: u64) -> UserRecord {
    UserRecord {
        id,
        email: format!("user{id}@reqres.in"),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    }
}

pub fn sample_users(ids: impl IntoIterator<Item = u64>) -> Vec<UserRecord> {
    ids.into_iter().map(sample_user).collect()
}
