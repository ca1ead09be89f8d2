//! # Catalog Configuration
//!
//! Where the catalog lives and how long we wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Configuration Priority                      │
//! │                                                             │
//! │  1. Environment Variables (highest priority)                │
//! │     BODEGA_CATALOG_URL=https://catalog.internal             │
//! │     BODEGA_CATALOG_TIMEOUT_SECS=10                          │
//! │                                                             │
//! │  2. Default Values                                          │
//! │     https://fakestoreapi.com, 30 second timeout             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tracing::debug;

/// Connection settings for the remote catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL, no trailing slash. Endpoints are appended verbatim.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

fn default_base_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Creates a config pointing at the public demo catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads defaults, then applies environment variable overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Sets the catalog base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BODEGA_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.base_url = url;
        }

        if let Ok(secs) = std::env::var("BODEGA_CATALOG_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                debug!(timeout_secs = s, "Overriding catalog timeout from environment");
                self.timeout = Duration::from_secs(s);
            }
        }
    }
}
