//! Order Models

use ihram::orders::LookupToken;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting payment.
    Pending,

    /// Paid, not yet dispatched.
    Paid,

    /// Being packed.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled before dispatch.
    Cancelled,

    /// Payment returned.
    Refunded,

    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One product line of a stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog product identifier.
    pub product_id: String,

    /// Display name at the time of purchase.
    pub name: String,

    /// Units bought.
    pub quantity: u32,

    /// Unit price charged.
    pub unit_price: Decimal,
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient.
    pub name: String,

    /// Street address.
    pub line1: String,

    /// Additional address line.
    #[serde(default)]
    pub line2: Option<String>,

    /// Postal code.
    pub postal_code: String,

    /// City.
    pub city: String,

    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// A payment recorded against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Amount paid.
    pub amount: Decimal,

    /// Processor status, as reported.
    pub status: String,

    /// When the payment was recorded.
    pub created_at: Timestamp,
}

/// An order row as stored, including its lookup token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    /// Display order number.
    pub order_number: String,

    /// Secret lookup token.
    pub lookup_token: LookupToken,

    /// Fulfilment status.
    pub status: OrderStatus,

    /// Products bought.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Delivery address, absent for donation-only orders.
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,

    /// Payments recorded against the order.
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,

    /// Amount charged.
    pub total: Decimal,

    /// When the order was placed.
    pub created_at: Timestamp,
}

/// What a guest may see of their order. The lookup token is never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    /// Display order number.
    pub order_number: String,

    /// Fulfilment status.
    pub status: OrderStatus,

    /// Products bought.
    pub items: Vec<OrderItem>,

    /// Delivery address.
    pub shipping_address: Option<ShippingAddress>,

    /// Payments recorded against the order.
    pub payments: Vec<PaymentRecord>,

    /// Amount charged.
    pub total: Decimal,

    /// When the order was placed.
    pub created_at: Timestamp,
}

impl From<OrderRecord> for OrderView {
    fn from(record: OrderRecord) -> Self {
        let OrderRecord {
            order_number,
            lookup_token: _,
            status,
            items,
            shipping_address,
            payments,
            total,
            created_at,
        } = record;

        Self {
            order_number,
            status,
            items,
            shipping_address,
            payments,
            total,
            created_at,
        }
    }
}
