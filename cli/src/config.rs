//! Configuration file handling for the CLI.
//!
//! Settings are layered, later layers winning:
//! 1. built-in defaults (the public mock service)
//! 2. `$XDG_CONFIG_HOME/roster/config.toml` (or `--config`)
//! 3. `ROSTER_*` environment variables and command-line flags
//!
//! ```toml
//! [api]
//! base_url = "https://reqres.in/api"
//! key = "reqres-free-v1"
//! per_page = 6
//!
//! [login]
//! username = "test"
//! password = "password"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use roster_business::{BusinessConfig, Credentials};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::ApiArgs;

/// CLI configuration stored on disk
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub login: LoginSection,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub key: Option<String>,
    pub per_page: Option<u32>,
}

/// The credential pair the console's login screen accepts.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSection {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FileConfig {
    /// `$XDG_CONFIG_HOME/roster/config.toml` on Linux, the platform
    /// equivalent elsewhere.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "roster")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`.
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `--config` when given, otherwise from the default path.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()?),
        }
    }

    /// Apply this file over the defaults, then `args` over the result.
    pub fn resolve(&self, args: &ApiArgs) -> BusinessConfig {
        let base_url = args
            .api_url
            .clone()
            .or_else(|| self.api.base_url.clone());
        let mut config = base_url.map_or_else(BusinessConfig::default, BusinessConfig::new);

        if let Some(key) = args.api_key.clone().or_else(|| self.api.key.clone()) {
            config = config.with_api_key(Some(key));
        }
        if let Some(per_page) = args.per_page.or(self.api.per_page) {
            config = config.with_per_page(per_page);
        }

        let defaults = Credentials::default();
        config.with_credentials(Credentials {
            username: self.login.username.clone().unwrap_or(defaults.username),
            password: self.login.password.clone().unwrap_or(defaults.password),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use roster_business::{DEFAULT_API_BASE_URL, DEFAULT_API_KEY, DEFAULT_PER_PAGE};

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = FileConfig::load_from(&dir.path().join("config.toml")).expect("load");

        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_defaults_resolve_to_public_mock() {
        let resolved = FileConfig::default().resolve(&ApiArgs::default());

        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.api_key(), Some(DEFAULT_API_KEY));
        assert_eq!(resolved.per_page, DEFAULT_PER_PAGE);
        assert_eq!(resolved.credentials, Credentials::default());
    }

    #[test]
    fn test_file_values_apply() {
        let file = write_config(
            r#"
            [api]
            base_url = "http://localhost:8080/api"
            per_page = 10

            [login]
            username = "admin"
            password = "s3cret"
            "#,
        );

        let resolved = FileConfig::load_from(file.path())
            .expect("load")
            .resolve(&ApiArgs::default());

        assert_eq!(resolved.api_base_url, "http://localhost:8080/api");
        assert_eq!(resolved.per_page, 10);
        assert_eq!(resolved.api_key(), Some(DEFAULT_API_KEY));
        assert_eq!(resolved.credentials.username, "admin");
        assert_eq!(resolved.credentials.password, "s3cret");
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_config(
            r#"
            [api]
            base_url = "http://localhost:8080/api"
            key = "from-file"
            per_page = 10
            "#,
        );
        let args = ApiArgs {
            api_url: Some("http://127.0.0.1:3000/api".to_owned()),
            api_key: Some("from-flag".to_owned()),
            per_page: Some(3),
            ..ApiArgs::default()
        };

        let resolved = FileConfig::load_from(file.path())
            .expect("load")
            .resolve(&args);

        assert_eq!(resolved.api_base_url, "http://127.0.0.1:3000/api");
        assert_eq!(resolved.api_key(), Some("from-flag"));
        assert_eq!(resolved.per_page, 3);
    }

    #[test]
    fn test_blank_key_disables_header() {
        let file = write_config("[api]\nkey = \"\"\n");

        let resolved = FileConfig::load_from(file.path())
            .expect("load")
            .resolve(&ApiArgs::default());

        assert!(resolved.api_key().is_none());
    }

    #[test]
    fn test_partial_login_keeps_default_password() {
        let file = write_config("[login]\nusername = \"ops\"\n");

        let resolved = FileConfig::load_from(file.path())
            .expect("load")
            .resolve(&ApiArgs::default());

        assert_eq!(resolved.credentials.username, "ops");
        assert_eq!(resolved.credentials.password, "password");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let file = write_config("[api\nbase_url = ");

        let err = FileConfig::load_from(file.path()).expect_err("must fail");
        assert!(
            err.to_string().contains("Failed to parse config file"),
            "unexpected error: {err}"
        );
    }
}
