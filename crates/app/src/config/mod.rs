//! Application configuration

use clap::Args;

use crate::config::{
    checkout::CheckoutConfig,
    observability::LoggingConfig,
    pricing::{FeeConfig, ShippingConfig},
    storage::StorageConfig,
    store::StoreConfig,
};

pub mod checkout;
pub mod observability;
pub mod pricing;
pub mod storage;
pub mod store;

/// Ihram configuration, read from CLI arguments, the environment and `.env`.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Hosted checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Payment processor fee settings.
    #[command(flatten)]
    pub fees: FeeConfig,

    /// Per-item shipping rates.
    #[command(flatten)]
    pub shipping: ShippingConfig,

    /// Hosted order store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Local cart and preference storage.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load a `.env` file into the process environment, if there is one.
pub fn load_dotenv() {
    // Missing .env is fine
    _ = dotenvy::dotenv();
}
