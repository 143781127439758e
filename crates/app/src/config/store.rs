//! Order Store Config

use std::time::Duration;

use clap::Args;

/// Hosted relational store holding orders and inquiries.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Base URL of the hosted store's REST interface
    #[arg(long, env = "ORDER_STORE_URL")]
    pub order_store_url: Option<String>,

    /// API key for the hosted store
    #[arg(long, env = "ORDER_STORE_KEY", hide_env_values = true)]
    pub order_store_key: Option<String>,

    /// Seconds to wait for the hosted store before giving up
    #[arg(long, env = "ORDER_STORE_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub order_store_timeout_seconds: u64,
}

impl StoreConfig {
    /// Request timeout for the hosted store.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.order_store_timeout_seconds)
    }
}
