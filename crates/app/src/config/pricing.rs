//! Pricing Config

use clap::Args;
use rust_decimal::Decimal;

use ihram::{donations::FeeSchedule, pricing::PriceComposer, shipping::ShippingRates};

/// Payment processor pass-through fees, applied when a donor covers fees.
#[derive(Debug, Args)]
pub struct FeeConfig {
    /// Proportional processor fee, as a fraction
    #[arg(long, env = "PROCESSOR_FEE_RATE", default_value = "0.029")]
    pub processor_fee_rate: Decimal,

    /// Fixed processor fee per transaction
    #[arg(long, env = "PROCESSOR_FIXED_FEE", default_value = "0.25")]
    pub processor_fixed_fee: Decimal,
}

impl FeeConfig {
    /// The configured fee schedule.
    #[must_use]
    pub fn schedule(&self) -> FeeSchedule {
        FeeSchedule {
            rate: self.processor_fee_rate,
            fixed: self.processor_fixed_fee,
        }
    }
}

/// Flat per-item shipping rates.
#[derive(Debug, Args)]
pub struct ShippingConfig {
    /// Per-item rate within Sweden
    #[arg(long, env = "SHIPPING_RATE_DOMESTIC", default_value = "9")]
    pub shipping_rate_domestic: Decimal,

    /// Per-item rate to the other Nordic countries
    #[arg(long, env = "SHIPPING_RATE_NEARBY", default_value = "9")]
    pub shipping_rate_nearby: Decimal,

    /// Per-item rate to the rest of the EU
    #[arg(long, env = "SHIPPING_RATE_REST_OF_UNION", default_value = "14")]
    pub shipping_rate_rest_of_union: Decimal,
}

impl ShippingConfig {
    /// The configured rates.
    #[must_use]
    pub fn rates(&self) -> ShippingRates {
        ShippingRates {
            domestic: self.shipping_rate_domestic,
            nearby: self.shipping_rate_nearby,
            rest_of_union: self.shipping_rate_rest_of_union,
        }
    }
}

/// Build the price composer from the shipping and fee settings.
#[must_use]
pub fn composer(shipping: &ShippingConfig, fees: &FeeConfig) -> PriceComposer {
    PriceComposer::new(shipping.rates(), fees.schedule())
}
