/// Public mock service the console talks to unless told otherwise.
pub const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";

/// Static key the public mock service expects on every request.
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Header carrying [`BusinessConfig::api_key`].
pub const API_KEY_HEADER: &str = "x-api-key";

/// Fixed page size sent as `per_page` on every list request.
pub const DEFAULT_PER_PAGE: u32 = 6;

/// The one credential pair the login gate accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "test".to_owned(),
            password: "password".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Base URL of the users collection's parent, without a trailing slash.
    pub api_base_url: String,
    /// Sent as [`API_KEY_HEADER`] when present.
    pub api_key: Option<String>,
    pub per_page: u32,
    pub credentials: Credentials,
}

impl BusinessConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Sets the page size. Zero is bumped to one.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// `{api_base_url}/users`
    pub fn users_url(&self) -> String {
        format!("{}/users", self.api_base_url.trim_end_matches('/'))
    }

    /// `{api_base_url}/users/{id}`
    pub fn user_url(&self, id: u64) -> String {
        format!("{}/{id}", self.users_url())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_key: Some(DEFAULT_API_KEY.to_owned()),
            per_page: DEFAULT_PER_PAGE,
            credentials: Credentials::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_public_mock() {
        let config = BusinessConfig::default();

        assert_eq!(config.users_url(), "https://reqres.in/api/users");
        assert_eq!(config.api_key(), Some("reqres-free-v1"));
        assert_eq!(config.per_page, 6);
        assert_eq!(config.credentials.username, "test");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = BusinessConfig::new("http://127.0.0.1:8080/api/");

        assert_eq!(config.users_url(), "http://127.0.0.1:8080/api/users");
        assert_eq!(config.user_url(7), "http://127.0.0.1:8080/api/users/7");
    }

    #[test]
    fn test_blank_api_key_is_dropped() {
        let config = BusinessConfig::default().with_api_key(Some("  ".to_owned()));
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_per_page_never_zero() {
        let config = BusinessConfig::default().with_per_page(0);
        assert_eq!(config.per_page, 1);
    }
}
