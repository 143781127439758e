//! Checkout Models

use ihram::{
    cart::CheckoutLine,
    checkout::RedirectUrls,
    donations::{DonationDirection, DonationFrequency},
    orders::{LookupToken, OrderIdentity, OrderNumber},
};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product purchase, identified by product id and quantity only. Prices are
/// resolved by the checkout endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCheckoutRequest {
    /// Products and quantities.
    pub items: Vec<CheckoutLine>,

    /// Optional donation added on top of the purchase.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub donation: Option<Decimal>,

    /// Landing page after payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    /// Landing page after an abandoned payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Standalone donation.
///
/// `amount` is the donor's base amount; with `cover_fees` set the endpoint
/// inflates it by the processor fees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCheckoutRequest {
    /// Base amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Requested frequency.
    pub frequency: DonationFrequency,

    /// Requested use of the funds.
    pub direction: DonationDirection,

    /// Keep the donor's name out of acknowledgements.
    pub anonymous: bool,

    /// Send a receipt by email.
    pub wants_receipt: bool,

    /// Where to send the receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_email: Option<String>,

    /// Inflate the charge to cover processor fees.
    pub cover_fees: bool,

    /// Landing page after payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    /// Landing page after an abandoned payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Either kind of checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckoutRequest {
    /// Product purchase.
    Products(ProductCheckoutRequest),

    /// Standalone donation.
    Donation(DonationCheckoutRequest),
}

impl CheckoutRequest {
    /// Endpoint path, relative to the checkout API root.
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Products(_) => "create-checkout-session",
            Self::Donation(_) => "create-donation-session",
        }
    }

    /// Attach redirect URLs.
    #[must_use]
    pub fn with_redirects(mut self, urls: RedirectUrls) -> Self {
        let RedirectUrls { success, cancel } = urls;

        match &mut self {
            Self::Products(request) => {
                request.success_url = Some(success);
                request.cancel_url = Some(cancel);
            }
            Self::Donation(request) => {
                request.success_url = Some(success);
                request.cancel_url = Some(cancel);
            }
        }

        self
    }
}

/// A created hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Hosted payment page to redirect the customer to.
    pub url: Url,

    /// Order number the endpoint assigned to this checkout, if any.
    pub order_number: Option<OrderNumber>,

    /// Lookup token the endpoint stored with the order, if any.
    pub lookup_token: Option<LookupToken>,
}

impl CheckoutSession {
    /// A session carrying only a redirect URL.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            order_number: None,
            lookup_token: None,
        }
    }

    /// The guest credentials, when the endpoint returned both halves.
    pub fn identity(&self) -> Option<OrderIdentity> {
        Some(OrderIdentity {
            order_number: self.order_number.clone()?,
            lookup_token: self.lookup_token?,
        })
    }
}

/// Body returned by the checkout endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    #[serde(default)]
    pub(crate) url: Option<String>,

    #[serde(default)]
    pub(crate) error: Option<String>,

    #[serde(default)]
    pub(crate) order_number: Option<String>,

    #[serde(default)]
    pub(crate) lookup_token: Option<String>,
}
