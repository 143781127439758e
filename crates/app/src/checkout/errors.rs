//! Checkout Errors

use ihram::{donations::DonationError, orders::CredentialError, pricing::PricingError};
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while requesting a hosted checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A product checkout was attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The donation cannot be charged.
    #[error(transparent)]
    Donation(#[from] DonationError),

    /// A form field is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another checkout request is still outstanding.
    #[error("a checkout request is already in progress")]
    InFlight,

    /// The checkout endpoint did not answer in time.
    #[error("checkout request timed out")]
    Timeout,

    /// The checkout endpoint refused to create a session.
    #[error("checkout was rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,

        /// Error reported by the endpoint.
        message: String,
    },

    /// The endpoint answered without a redirect URL.
    #[error("checkout response did not include a url")]
    MissingUrl,

    /// The endpoint answered with a body that is not a checkout response.
    #[error("checkout response could not be parsed")]
    InvalidResponse(#[source] serde_json::Error),

    /// The endpoint returned a lookup token that is not a valid token.
    #[error("checkout response carried an invalid lookup token")]
    InvalidLookupToken(#[source] CredentialError),

    /// A URL is not an absolute http(s) URL.
    #[error("invalid checkout url: {0}")]
    InvalidUrl(String),

    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for CheckoutError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

impl From<PricingError> for CheckoutError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::EmptyCart => Self::EmptyCart,
        }
    }
}
