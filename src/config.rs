use crate::error::{Error, Result};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.apper.io/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Gateway credentials; both halves are needed to talk to a live project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub project_id: String,
    pub public_key: String,
}

/// Runtime configuration loaded from environment variables.
///
/// | Env Var                          | Default                    |
/// |----------------------------------|----------------------------|
/// | `APPER_PROJECT_ID`               | unset (offline mode)       |
/// | `APPER_PUBLIC_KEY`               | unset (offline mode)       |
/// | `APPER_BASE_URL`                 | `https://api.apper.io/v1`  |
/// | `NESTQUEST_REQUEST_TIMEOUT_SECS` | `30`                       |
/// | `NESTQUEST_PAGE_SIZE`            | `20`                       |
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let credentials = match (non_empty("APPER_PROJECT_ID"), non_empty("APPER_PUBLIC_KEY")) {
            (Some(project_id), Some(public_key)) => Some(Credentials { project_id, public_key }),
            (None, None) => None,
            _ => {
                return Err(Error::Validation(
                    "APPER_PROJECT_ID and APPER_PUBLIC_KEY must be set together".into(),
                ))
            }
        };

        let base_url = non_empty("APPER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match non_empty("NESTQUEST_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                Error::Validation("NESTQUEST_REQUEST_TIMEOUT_SECS must be a whole number of seconds".into())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let page_size = match non_empty("NESTQUEST_PAGE_SIZE") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Validation("NESTQUEST_PAGE_SIZE must be a positive integer".into()))?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            credentials,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            page_size,
        })
    }

    pub fn is_offline(&self) -> bool {
        self.credentials.is_none()
    }
}
