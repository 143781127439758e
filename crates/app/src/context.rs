//! App Context

use std::sync::Arc;

use ihram::{
    cart::{CartStore, Rehydration},
    pricing::PriceComposer,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    checkout::{CheckoutError, CheckoutService, HttpCheckoutClient},
    config::{AppConfig, pricing::composer},
    inquiries::{HttpInquirySink, InquiryService},
    orders::{HttpOrderStore, OrderLookupService},
    rest::{RestClient, StoreError},
    storage::FileStorage,
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// A setting the command needs was not provided.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The checkout client could not be built.
    #[error("failed to build checkout client")]
    Checkout(#[source] CheckoutError),

    /// The store client could not be built.
    #[error("failed to build store client")]
    Store(#[source] StoreError),
}

/// Services built from configuration. External collaborators that are not
/// configured stay absent until a command asks for them.
#[derive(Debug)]
pub struct AppContext {
    /// Pricing with the configured rates and fees.
    pub composer: PriceComposer,

    /// Local storage for the cart and preferences.
    pub storage: FileStorage,

    checkout: Option<CheckoutService>,
    orders: Option<OrderLookupService>,
    inquiries: Option<InquiryService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured URL is invalid or an HTTP client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let composer = composer(&config.shipping, &config.fees);

        let checkout = config
            .checkout
            .checkout_api_url
            .as_deref()
            .map(|url| {
                HttpCheckoutClient::new(url, config.checkout.timeout())
                    .map(|client| {
                        CheckoutService::new(Arc::new(client), composer, &config.checkout.site_url)
                    })
                    .map_err(AppInitError::Checkout)
            })
            .transpose()?;

        let rest = match (
            config.store.order_store_url.as_deref(),
            config.store.order_store_key.as_ref(),
        ) {
            (Some(url), Some(key)) => Some(
                RestClient::new(url, key.clone(), config.store.timeout())
                    .map_err(AppInitError::Store)?,
            ),
            _ => None,
        };

        debug!(
            checkout = checkout.is_some(),
            store = rest.is_some(),
            data_dir = %config.storage.data_dir.display(),
            "application context built"
        );

        Ok(Self {
            composer,
            storage: FileStorage::new(&config.storage.data_dir),
            checkout,
            orders: rest
                .clone()
                .map(|rest| OrderLookupService::new(Arc::new(HttpOrderStore::new(rest)))),
            inquiries: rest.map(|rest| InquiryService::new(Arc::new(HttpInquirySink::new(rest)))),
        })
    }

    /// Load the persisted cart.
    pub fn cart(&self) -> CartStore<FileStorage> {
        let (cart, status) = CartStore::load_with_status(self.storage.clone());

        match status {
            Rehydration::Corrupt => warn!("stored cart could not be read; starting empty"),
            Rehydration::Restored(lines) => debug!(lines, "cart restored"),
            Rehydration::Empty => debug!("no stored cart"),
        }

        cart
    }

    /// The checkout service.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::NotConfigured`] without a checkout API URL.
    pub fn checkout(&self) -> Result<&CheckoutService, AppInitError> {
        self.checkout
            .as_ref()
            .ok_or(AppInitError::NotConfigured("CHECKOUT_API_URL"))
    }

    /// The order lookup service.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::NotConfigured`] without store credentials.
    pub fn orders(&self) -> Result<&OrderLookupService, AppInitError> {
        self.orders
            .as_ref()
            .ok_or(AppInitError::NotConfigured("ORDER_STORE_URL and ORDER_STORE_KEY"))
    }

    /// The inquiry service.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::NotConfigured`] without store credentials.
    pub fn inquiries(&self) -> Result<&InquiryService, AppInitError> {
        self.inquiries
            .as_ref()
            .ok_or(AppInitError::NotConfigured("ORDER_STORE_URL and ORDER_STORE_KEY"))
    }
}
