use std::time::Duration;

use serde::Deserialize;

/// Article extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// `User-Agent` sent when fetching pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Page fetch timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on DOM elements the readability pass will score
    #[serde(default = "default_max_elements")]
    pub max_elements_to_parse: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_elements_to_parse: default_max_elements(),
        }
    }
}

impl ExtractConfig {
    /// Get the fetch timeout as Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_user_agent() -> String {
    format!("blogitup/{} (+https://blogitup-fe.vercel.app)", env!("CARGO_PKG_VERSION"))
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_elements() -> usize {
    9000
}
