//! Ihram
//!
//! Pricing, cart and guest-order core for the Ihram storefront: flat per-item
//! shipping, donation fee covering, a persisted cart and the order-number /
//! lookup-token pair used for guest order retrieval.

pub mod cart;
pub mod checkout;
pub mod donations;
pub mod locale;
pub mod money;
pub mod orders;
pub mod preferences;
pub mod prelude;
pub mod pricing;
pub mod shipping;
pub mod storage;
