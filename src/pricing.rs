//! Pricing

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartLineItem,
    donations::{DonationAmount, FeeSchedule},
    money::{format_amount, round2},
    shipping::{ShippingRates, ShippingRegion},
};

/// Errors that stop a product checkout before it reaches the payment API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// There is nothing in the cart to pay for.
    #[error("cart is empty")]
    EmptyCart,
}

/// Reject a product checkout with no items in it.
///
/// # Errors
///
/// Returns [`PricingError::EmptyCart`] when `item_count` is zero.
pub fn ensure_product_checkout(item_count: u32) -> Result<(), PricingError> {
    if item_count == 0 {
        return Err(PricingError::EmptyCart);
    }

    Ok(())
}

/// Inputs to a price quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Sum of the line items.
    pub subtotal: Decimal,

    /// Number of units being shipped.
    pub item_count: u32,

    /// Shipping destination.
    pub region: ShippingRegion,

    /// Optional donation added at checkout.
    pub donation: Option<DonationAmount>,

    /// Inflate the donation to cover processor fees.
    pub cover_fees: bool,
}

/// Breakdown of what the customer will be charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Products.
    pub line_items_total: Decimal,

    /// Shipping for every unit.
    pub shipping_total: Decimal,

    /// Donation, including any covered fees.
    pub donation_total: Decimal,

    /// Everything together.
    pub grand_total: Decimal,
}

/// Combines cart, shipping and donation into a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceComposer {
    rates: ShippingRates,
    fees: FeeSchedule,
}

impl PriceComposer {
    /// Create a composer with the given shipping rates and processor fees.
    pub fn new(rates: ShippingRates, fees: FeeSchedule) -> Self {
        Self { rates, fees }
    }

    /// The configured shipping rates.
    pub fn rates(&self) -> &ShippingRates {
        &self.rates
    }

    /// The configured processor fees.
    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Compose a quote.
    ///
    /// Intermediate amounts keep full precision; each reported total is
    /// rounded to cents.
    pub fn quote(&self, request: &QuoteRequest) -> Quote {
        let line_items_total = request.subtotal;
        let shipping_total = self.rates.calculate(request.item_count, request.region);
        let donation_total = request
            .donation
            .unwrap_or_default()
            .total(request.cover_fees, &self.fees);

        Quote {
            line_items_total: round2(line_items_total),
            shipping_total: round2(shipping_total),
            donation_total,
            grand_total: round2(line_items_total + shipping_total + donation_total),
        }
    }
}

impl Quote {
    /// Render the quote as a table, one row per cart line followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write, lines: &[CartLineItem]) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Total"]);

        for line in lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                format_amount(line.price),
                format_amount(line.line_total()),
            ]);
        }

        let summary = [
            ("Subtotal", self.line_items_total),
            ("Shipping", self.shipping_total),
            ("Donation", self.donation_total),
            ("Total", self.grand_total),
        ];

        for (label, amount) in summary {
            builder.push_record([
                label.to_owned(),
                String::new(),
                String::new(),
                format_amount(amount),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn request(subtotal: Decimal, item_count: u32) -> QuoteRequest {
        QuoteRequest {
            subtotal,
            item_count,
            ..QuoteRequest::default()
        }
    }

    #[test]
    fn quote_without_donation() {
        let quote = PriceComposer::default().quote(&request(dec!(698), 2));

        assert_eq!(quote.line_items_total, dec!(698));
        assert_eq!(quote.shipping_total, dec!(18));
        assert_eq!(quote.donation_total, Decimal::ZERO);
        assert_eq!(quote.grand_total, dec!(716));
    }

    #[test]
    fn quote_with_fee_covered_donation() {
        let quote = PriceComposer::default().quote(&QuoteRequest {
            donation: Some(DonationAmount::new(dec!(10))),
            cover_fees: true,
            region: ShippingRegion::RestOfUnion,
            ..request(dec!(349), 1)
        });

        assert_eq!(quote.shipping_total, dec!(14));
        assert_eq!(quote.donation_total, dec!(10.54));
        assert_eq!(quote.grand_total, dec!(373.54));
    }

    #[test]
    fn unparseable_donation_adds_nothing() {
        let quote = PriceComposer::default().quote(&QuoteRequest {
            donation: Some(DonationAmount::parse("ten euros")),
            cover_fees: true,
            ..request(dec!(349), 1)
        });

        assert_eq!(quote.donation_total, Decimal::ZERO);
        assert_eq!(quote.grand_total, dec!(358));
    }

    #[test]
    fn grand_total_rounds_once_at_the_end() {
        let quote = PriceComposer::default().quote(&request(dec!(10.004), 1));

        assert_eq!(quote.line_items_total, dec!(10));
        assert_eq!(quote.grand_total, dec!(19));

        let quote = PriceComposer::default().quote(&request(dec!(10.005), 1));

        assert_eq!(quote.grand_total, dec!(19.01));
    }

    #[test]
    fn configured_rates_and_fees_flow_into_the_quote() {
        let composer = PriceComposer::new(
            ShippingRates {
                domestic: dec!(4),
                nearby: dec!(6),
                rest_of_union: dec!(10),
            },
            FeeSchedule {
                rate: dec!(0.05),
                fixed: dec!(0),
            },
        );

        let quote = composer.quote(&QuoteRequest {
            donation: Some(DonationAmount::new(dec!(20))),
            cover_fees: true,
            region: ShippingRegion::Nearby,
            ..request(dec!(100), 3)
        });

        assert_eq!(quote.shipping_total, dec!(18));
        assert_eq!(quote.donation_total, dec!(21));
        assert_eq!(quote.grand_total, dec!(139));
    }

    #[test]
    fn empty_product_checkout_is_rejected() {
        assert_eq!(ensure_product_checkout(0), Err(PricingError::EmptyCart));
        assert_eq!(ensure_product_checkout(1), Ok(()));
    }

    #[test]
    fn write_to_lists_lines_and_totals() -> TestResult {
        let lines = [CartLineItem {
            id: "ihram-adult".to_owned(),
            name: "Ihram set".to_owned(),
            image: None,
            price: dec!(349),
            quantity: 2,
        }];

        let quote = PriceComposer::default().quote(&request(dec!(698), 2));

        let mut out = Vec::new();
        quote.write_to(&mut out, &lines)?;

        let rendered = String::from_utf8(out)?;

        for expected in ["Ihram set", "Subtotal", "Shipping", "Donation", "Total"] {
            assert!(
                rendered.contains(expected),
                "missing {expected:?} in:\n{rendered}"
            );
        }

        Ok(())
    }
}
