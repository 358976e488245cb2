use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jobicy.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const FEED_PATH: &str = "/api/v2/remote-jobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("jobfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn feed_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), FEED_PATH)
    }
}
