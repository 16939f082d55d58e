//! API client configuration.

use std::time::Duration;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::ApiUrl;

/// Server root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// API version segment used when nothing else is configured.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Per-request deadline used when a request does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the server root.
pub const ENV_API_URL: &str = "TICKETERA_API_URL";

/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "TICKETERA_API_VERSION";

/// Environment variable holding the default timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TICKETERA_TIMEOUT_SECS";

/// Configuration shared by every request a gateway makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base address every request path is resolved against.
    pub base_url: ApiUrl,
    /// Default deadline for a single request.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ApiConfig {
    /// Create a configuration for an already-resolved base address.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("ticketera/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Create a configuration from a server root and API version.
    ///
    /// The base address becomes `{root}/api/{version}`.
    pub fn for_server(root: &str, version: &str) -> Result<Self> {
        let version = version.trim_matches('/');
        if version.is_empty() {
            return Err(InvalidInputError::Field {
                field: "api version",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let base = format!("{}/api/{}", root.trim_end_matches('/'), version);
        Ok(Self::new(ApiUrl::new(base)?))
    }

    /// Override the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
