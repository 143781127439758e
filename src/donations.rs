//! Donations

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{parse_amount, round2};

/// Smallest amount a donation checkout may charge.
pub const MINIMUM_CHARGE: Decimal = dec!(1);

/// Errors that stop a donation from reaching checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DonationError {
    /// The charged amount is below [`MINIMUM_CHARGE`].
    #[error("donation total {total} is below the minimum charge")]
    BelowMinimumCharge {
        /// The amount that would have been charged.
        total: Decimal,
    },
}

/// Payment processor pass-through pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Proportional fee, as a fraction of the amount.
    pub rate: Decimal,

    /// Fixed fee per transaction.
    pub fixed: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rate: dec!(0.029),
            fixed: dec!(0.25),
        }
    }
}

impl FeeSchedule {
    /// Inflate `base` so the processor fees are covered by the donor.
    pub fn cover(&self, base: Decimal) -> Decimal {
        round2(base + base * self.rate + self.fixed)
    }
}

/// A donation amount parsed from user input.
///
/// Never negative: anything non-numeric or below zero is treated as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DonationAmount(Decimal);

impl DonationAmount {
    /// No donation.
    pub const ZERO: DonationAmount = DonationAmount(Decimal::ZERO);

    /// Wrap an amount, clamping negatives to zero.
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    /// Parse user input, treating anything that is not a number as zero.
    pub fn parse(input: &str) -> Self {
        parse_amount(input).map_or(Self::ZERO, Self::new)
    }

    /// The base amount before any fee covering.
    pub fn base(self) -> Decimal {
        self.0
    }

    /// The amount, if there is one.
    pub fn positive(self) -> Option<Decimal> {
        (self.0 > Decimal::ZERO).then_some(self.0)
    }

    /// Amount to charge for this donation.
    ///
    /// Covering fees only applies to a positive base; an empty donation stays
    /// at zero rather than being charged the fixed fee.
    pub fn total(self, cover_fees: bool, fees: &FeeSchedule) -> Decimal {
        match self.positive() {
            Some(base) if cover_fees => fees.cover(base),
            Some(base) => round2(base),
            None => Decimal::ZERO,
        }
    }
}

impl From<Decimal> for DonationAmount {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

/// How often a donation repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationFrequency {
    /// A single payment.
    #[default]
    OneTime,

    /// Requested as monthly; charged once at checkout.
    Monthly,
}

/// Where a donation should be spent. Reporting metadata only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationDirection {
    /// Wherever the need is greatest.
    #[default]
    GeneralFund,

    /// Ihram garments for pilgrims who cannot afford them.
    PilgrimGarments,

    /// Supplies for mosques.
    MosqueSupplies,
}

/// A value that is not a known option.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
}

macro_rules! option_names {
    ($ty:ty, $kind:literal, { $($variant:path => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Stable identifier used in payloads and on the command line.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(UnknownOption { kind: $kind, value: value.to_owned() }),
                }
            }
        }
    };
}

option_names!(DonationFrequency, "donation frequency", {
    DonationFrequency::OneTime => "one-time",
    DonationFrequency::Monthly => "monthly",
});

option_names!(DonationDirection, "donation direction", {
    DonationDirection::GeneralFund => "general-fund",
    DonationDirection::PilgrimGarments => "pilgrim-garments",
    DonationDirection::MosqueSupplies => "mosque-supplies",
});

/// Everything the donor chose on the donation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationIntent {
    /// Base amount.
    pub amount: DonationAmount,

    /// Requested frequency.
    pub frequency: DonationFrequency,

    /// Requested use of the funds.
    pub direction: DonationDirection,

    /// Keep the donor's name out of any public acknowledgement.
    pub anonymous: bool,

    /// Send a receipt by email.
    pub wants_receipt: bool,

    /// Where to send the receipt.
    pub receipt_email: Option<String>,

    /// Inflate the amount to cover processor fees.
    pub cover_fees: bool,
}

impl DonationIntent {
    /// The amount to charge, enforcing the minimum charge.
    ///
    /// # Errors
    ///
    /// Returns [`DonationError::BelowMinimumCharge`] when the total is below
    /// [`MINIMUM_CHARGE`].
    pub fn charge(&self, fees: &FeeSchedule) -> Result<Decimal, DonationError> {
        let total = self.amount.total(self.cover_fees, fees);

        if total < MINIMUM_CHARGE {
            return Err(DonationError::BelowMinimumCharge { total });
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn covering_fees_on_ten_euros_charges_ten_fifty_four() {
        let amount = DonationAmount::new(dec!(10));

        assert_eq!(amount.total(true, &FeeSchedule::default()), dec!(10.54));
        assert_eq!(amount.total(false, &FeeSchedule::default()), dec!(10));
    }

    #[test]
    fn covering_fees_on_nothing_charges_nothing() {
        assert_eq!(
            DonationAmount::ZERO.total(true, &FeeSchedule::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn custom_fee_schedules_are_applied() {
        let fees = FeeSchedule {
            rate: dec!(0.015),
            fixed: dec!(1.80),
        };

        assert_eq!(DonationAmount::new(dec!(100)).total(true, &fees), dec!(103.30));
    }

    #[test]
    fn unparseable_and_negative_amounts_become_zero() {
        assert_eq!(DonationAmount::parse("lots"), DonationAmount::ZERO);
        assert_eq!(DonationAmount::parse("-5"), DonationAmount::ZERO);
        assert_eq!(DonationAmount::parse("25,50").base(), dec!(25.50));
    }

    #[test]
    fn charge_below_minimum_is_rejected() {
        let intent = DonationIntent {
            amount: DonationAmount::new(dec!(0.99)),
            ..DonationIntent::default()
        };

        assert_eq!(
            intent.charge(&FeeSchedule::default()),
            Err(DonationError::BelowMinimumCharge { total: dec!(0.99) })
        );
    }

    #[test]
    fn covering_fees_can_lift_a_donation_over_the_minimum() -> TestResult {
        let intent = DonationIntent {
            amount: DonationAmount::new(dec!(0.80)),
            cover_fees: true,
            ..DonationIntent::default()
        };

        assert_eq!(intent.charge(&FeeSchedule::default())?, dec!(1.07));

        Ok(())
    }

    #[test]
    fn options_parse_from_their_identifiers() -> TestResult {
        assert_eq!(
            "monthly".parse::<DonationFrequency>()?,
            DonationFrequency::Monthly
        );
        assert_eq!(
            "Mosque-Supplies".parse::<DonationDirection>()?,
            DonationDirection::MosqueSupplies
        );
        assert!("weekly".parse::<DonationFrequency>().is_err());

        Ok(())
    }

    #[test]
    fn options_serialise_as_kebab_case() -> TestResult {
        assert_eq!(
            serde_json::to_string(&DonationFrequency::OneTime)?,
            "\"one-time\""
        );
        assert_eq!(
            serde_json::to_string(&DonationDirection::PilgrimGarments)?,
            "\"pilgrim-garments\""
        );

        Ok(())
    }
}
