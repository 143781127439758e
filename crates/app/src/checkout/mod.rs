//! Checkout session requestor

mod client;
mod errors;
mod guard;
mod models;
mod service;

pub use client::*;
pub use errors::*;
pub use models::*;
pub use service::*;
