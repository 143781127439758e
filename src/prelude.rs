//! Ihram prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartError, CartLineItem, CartStore, CheckoutLine, NewCartItem, Rehydration},
    checkout::{RedirectUrls, session_id_from_query},
    donations::{
        DonationAmount, DonationDirection, DonationError, DonationFrequency, DonationIntent,
        FeeSchedule, MINIMUM_CHARGE,
    },
    locale::Locale,
    money::{format_amount, parse_amount, round2},
    orders::{CredentialError, LookupToken, OrderIdentity, OrderNumber},
    pricing::{PriceComposer, PricingError, Quote, QuoteRequest, ensure_product_checkout},
    shipping::{ShippingRates, ShippingRegion, calculate_shipping},
    storage::{KeyValueStorage, MemoryStorage, StorageError},
};
