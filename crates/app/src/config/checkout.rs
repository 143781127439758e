//! Checkout Config

use std::time::Duration;

use clap::Args;

/// Hosted checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Endpoint that creates hosted checkout sessions
    #[arg(long, env = "CHECKOUT_API_URL")]
    pub checkout_api_url: Option<String>,

    /// Seconds to wait for the checkout endpoint before giving up
    #[arg(long, env = "CHECKOUT_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub checkout_timeout_seconds: u64,

    /// Public storefront URL used to build success and cancel redirects
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,
}

impl CheckoutConfig {
    /// Request timeout for the checkout endpoint.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_seconds)
    }
}
