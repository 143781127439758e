use std::io::{self, Write};

use clap::Args;
use ihram::{
    cart::CartStore,
    donations::DonationAmount,
    pricing::{PriceComposer, QuoteRequest},
    shipping::ShippingRegion,
    storage::KeyValueStorage,
};
use ihram_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Shipping region (domestic, nearby, rest-of-union)
    #[arg(long, default_value_t = ShippingRegion::Domestic)]
    region: ShippingRegion,

    /// Destination country code, instead of a region
    #[arg(long, conflicts_with = "region")]
    country: Option<String>,

    /// Donation to add, in EUR
    #[arg(long)]
    donation: Option<String>,

    /// Cover the payment processor's fees on the donation
    #[arg(long)]
    cover_fees: bool,
}

pub(crate) fn run(ctx: &AppContext, args: QuoteArgs) -> Result<(), String> {
    let region = match args.country.as_deref() {
        Some(country) => ShippingRegion::for_country(country)
            .ok_or_else(|| format!("no shipping to {country}"))?,
        None => args.region,
    };

    let cart = ctx.cart();

    write_quote(
        io::stdout().lock(),
        &cart,
        &ctx.composer,
        region,
        args.donation.as_deref().map(DonationAmount::parse),
        args.cover_fees,
    )
    .map_err(|error| format!("failed to write quote: {error}"))
}

/// An empty cart has nothing to ship and nothing to check out, so it gets no
/// quote.
fn write_quote<S: KeyValueStorage>(
    mut out: impl Write,
    cart: &CartStore<S>,
    composer: &PriceComposer,
    region: ShippingRegion,
    donation: Option<DonationAmount>,
    cover_fees: bool,
) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "cart is empty");
    }

    let quote = composer.quote(&QuoteRequest {
        subtotal: cart.total_price(),
        item_count: cart.total_items(),
        region,
        donation,
        cover_fees,
    });

    quote.write_to(out, cart.items())
}

#[cfg(test)]
mod tests {
    use ihram::{cart::NewCartItem, storage::MemoryStorage};
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn quote_for(cart: &CartStore<MemoryStorage>) -> TestResult<String> {
        let mut out = Vec::new();

        write_quote(
            &mut out,
            cart,
            &PriceComposer::default(),
            ShippingRegion::Domestic,
            None,
            false,
        )?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn empty_cart_is_not_quoted() -> TestResult {
        let cart = CartStore::load(MemoryStorage::new());

        let output = quote_for(&cart)?;

        assert_eq!(output, "cart is empty\n");
        assert!(!output.contains("Shipping"));

        Ok(())
    }

    #[test]
    fn filled_cart_is_quoted_with_shipping() -> TestResult {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(
            NewCartItem {
                id: "ihram-adult".to_owned(),
                name: "Ihram set".to_owned(),
                image: None,
                price: dec!(349),
            },
            1,
        )?;

        let output = quote_for(&cart)?;

        assert!(output.contains("Ihram set"));
        assert!(output.contains("Shipping"));

        Ok(())
    }
}
