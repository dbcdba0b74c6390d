//! Connection settings for the Taiga client.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Default Taiga deployment.
pub const DEFAULT_TAIGA_URL: &str = "https://cds.team/taiga";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable overriding the base URL.
pub const ENV_TAIGA_URL: &str = "TAIGA_URL";
/// Environment variable holding the API token.
pub const ENV_TAIGA_TOKEN: &str = "TAIGA_TOKEN";
/// Environment variable overriding the token file location.
pub const ENV_TAIGA_TOKEN_PATH: &str = "TAIGA_TOKEN_PATH";

/// Settings used to reach the dataset service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaigaConfig {
    /// Base URL, without a trailing `/api`.
    pub base_url: String,

    /// API token. Takes precedence over `token_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// File holding the API token (`~/.taiga/token` by default).
    pub token_path: PathBuf,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Treat the first column of every file as the row index, even for
    /// columnar files.
    #[serde(default)]
    pub matrix_index: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".taiga")
        .join("token")
}

impl Default for TaigaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAIGA_URL.to_string(),
            token: None,
            token_path: default_token_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            matrix_index: false,
        }
    }
}

impl TaigaConfig {
    /// Defaults overlaid with `TAIGA_URL`, `TAIGA_TOKEN` and `TAIGA_TOKEN_PATH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_TAIGA_URL) {
            config.base_url = url;
        }
        if let Ok(token) = std::env::var(ENV_TAIGA_TOKEN) {
            config.token = Some(token);
        }
        if let Some(path) = std::env::var_os(ENV_TAIGA_TOKEN_PATH) {
            config.token_path = PathBuf::from(path);
        }
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_matrix_index(mut self, enable: bool) -> Self {
        self.matrix_index = enable;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slash removed.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The explicit token, or the trimmed contents of the token file.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(token.trim().to_string());
        }
        match std::fs::read_to_string(&self.token_path) {
            Ok(contents) if !contents.trim().is_empty() => Ok(contents.trim().to_string()),
            Ok(_) => Err(FetchError::MissingToken(self.token_path.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::MissingToken(self.token_path.clone()))
            }
            Err(e) => Err(FetchError::TokenFile {
                path: self.token_path.clone(),
                source: e,
            }),
        }
    }
}
