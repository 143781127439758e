//! Ihram application layer: configuration, logging, the checkout session
//! requestor, guest order lookup, inquiry submission and local storage.

pub mod checkout;
pub mod config;
pub mod context;
pub mod inquiries;
pub mod observability;
pub mod orders;
pub mod rest;
pub mod storage;
pub mod validation;
