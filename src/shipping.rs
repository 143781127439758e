//! Shipping

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Destination country group used to pick a per-item shipping rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingRegion {
    /// Sweden.
    #[default]
    Domestic,

    /// The other Nordic countries.
    Nearby,

    /// Every other EU member state.
    RestOfUnion,
}

/// Nordic neighbours shipped at the nearby rate.
const NEARBY_COUNTRIES: [&str; 3] = ["DK", "FI", "NO"];

/// EU member states outside the Nordics.
const UNION_COUNTRIES: [&str; 24] = [
    "AT", "BE", "BG", "CY", "CZ", "DE", "EE", "ES", "FR", "GR", "HR", "HU", "IE", "IT", "LT", "LU",
    "LV", "MT", "NL", "PL", "PT", "RO", "SI", "SK",
];

impl ShippingRegion {
    /// Every region, in display order.
    pub const ALL: [ShippingRegion; 3] = [Self::Domestic, Self::Nearby, Self::RestOfUnion];

    /// Resolve the region for an ISO 3166-1 alpha-2 country code.
    ///
    /// Returns `None` for countries the store does not ship to.
    pub fn for_country(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();

        if code == "SE" {
            Some(Self::Domestic)
        } else if NEARBY_COUNTRIES.contains(&code.as_str()) {
            Some(Self::Nearby)
        } else if UNION_COUNTRIES.contains(&code.as_str()) {
            Some(Self::RestOfUnion)
        } else {
            None
        }
    }

    /// Stable identifier used in payloads and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Nearby => "nearby",
            Self::RestOfUnion => "rest-of-union",
        }
    }
}

impl fmt::Display for ShippingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region name that is not one of [`ShippingRegion::ALL`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown shipping region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for ShippingRegion {
    type Err = UnknownRegion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownRegion(value.to_owned()))
    }
}

/// Flat per-item shipping rates, in major currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    /// Rate for [`ShippingRegion::Domestic`].
    pub domestic: Decimal,

    /// Rate for [`ShippingRegion::Nearby`].
    pub nearby: Decimal,

    /// Rate for [`ShippingRegion::RestOfUnion`].
    pub rest_of_union: Decimal,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            domestic: dec!(9),
            nearby: dec!(9),
            rest_of_union: dec!(14),
        }
    }
}

impl ShippingRates {
    /// Per-item rate for a region.
    pub fn rate(&self, region: ShippingRegion) -> Decimal {
        match region {
            ShippingRegion::Domestic => self.domestic,
            ShippingRegion::Nearby => self.nearby,
            ShippingRegion::RestOfUnion => self.rest_of_union,
        }
    }

    /// Shipping cost for `quantity` items sent to `region`.
    ///
    /// The quantity is clamped with [`clamp_quantity`] first, so the result is
    /// never zero, negative or scaled by a fraction.
    pub fn calculate(&self, quantity: impl Into<Decimal>, region: ShippingRegion) -> Decimal {
        self.rate(region) * clamp_quantity(quantity.into())
    }
}

/// Clamp a raw quantity to `max(1, floor(quantity))`.
pub fn clamp_quantity(quantity: Decimal) -> Decimal {
    quantity.floor().max(Decimal::ONE)
}

/// Shipping cost for `quantity` items sent to `region` at the default rates.
pub fn calculate_shipping(quantity: impl Into<Decimal>, region: ShippingRegion) -> Decimal {
    ShippingRates::default().calculate(quantity, region)
}
