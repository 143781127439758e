//! Guest order identity
//!
//! A guest order is identified by a human-readable order number and an
//! unguessable lookup token. Only the pair together authorises a lookup; the
//! order number on its own is display material.

use std::{fmt, str::FromStr};

use jiff::{Zoned, civil::Date};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::{Builder, Uuid, Variant};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key for the identity of the order awaiting payment.
pub const PENDING_ORDER_KEY: &str = "ihram.pending-order";

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

const SUFFIX_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 5;

/// Position of each hyphen in a hyphenated UUID.
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];
const UUID_HYPHENATED_LEN: usize = 36;

/// Errors raised while parsing guest credentials.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The value was empty after trimming.
    #[error("credential is empty")]
    Empty,

    /// The lookup token is not a hyphenated version 1-5 UUID.
    #[error("lookup token is malformed")]
    MalformedToken,
}

/// Errors raised while remembering a pending order.
#[derive(Debug, Error)]
pub enum PendingOrderError {
    /// The identity could not be serialised.
    #[error("failed to serialise pending order")]
    Serialize(#[from] serde_json::Error),

    /// The identity could not be written.
    #[error("failed to persist pending order")]
    Storage(#[from] StorageError),
}

/// Display order number, `ORD-{YYYYMMDD}-{5 uppercase alphanumerics}` when generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate an order number for `date`.
    pub fn generate<R: Rng>(date: Date, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let index = rng.gen_range(0..SUFFIX_ALPHABET.len());

                SUFFIX_ALPHABET.get(index).copied().map_or('0', char::from)
            })
            .collect();

        Self(format!(
            "{ORDER_NUMBER_PREFIX}-{}-{suffix}",
            date.strftime("%Y%m%d")
        ))
    }

    /// Accept a presented order number. Any non-empty trimmed value is
    /// accepted, since the stored order number is not guaranteed to follow the
    /// generated format.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] for blank input.
    pub fn parse(input: &str) -> Result<Self, CredentialError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Whether this number has the shape produced by [`OrderNumber::generate`].
    pub fn is_generated_format(&self) -> bool {
        let mut parts = self.0.split('-');

        let (Some(prefix), Some(date), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        prefix == ORDER_NUMBER_PREFIX
            && date.len() == 8
            && date.bytes().all(|byte| byte.is_ascii_digit())
            && suffix.len() == SUFFIX_LEN
            && suffix.bytes().all(|byte| SUFFIX_ALPHABET.contains(&byte))
    }

    /// The order number as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret 128-bit lookup token, formatted as a UUID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupToken(Uuid);

impl LookupToken {
    /// Generate a random (version 4) token.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0_u8; 16];

        rng.fill(&mut bytes);

        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Parse a presented token.
    ///
    /// Only the canonical hyphenated form with a version between 1 and 5 and
    /// the RFC 4122 variant is accepted; simple, braced and URN forms are
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`CredentialError::Empty`]: the input is blank.
    /// - [`CredentialError::MalformedToken`]: the input is not UUID-shaped.
    pub fn parse(input: &str) -> Result<Self, CredentialError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }

        let bytes = trimmed.as_bytes();

        let hyphenated = bytes.len() == UUID_HYPHENATED_LEN
            && UUID_HYPHENS
                .iter()
                .all(|position| bytes.get(*position) == Some(&b'-'));

        if !hyphenated {
            return Err(CredentialError::MalformedToken);
        }

        let uuid = Uuid::try_parse(trimmed).map_err(|_invalid| CredentialError::MalformedToken)?;

        if !(1..=5).contains(&uuid.get_version_num()) || uuid.get_variant() != Variant::RFC4122 {
            return Err(CredentialError::MalformedToken);
        }

        Ok(Self(uuid))
    }

    /// The token as a UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for LookupToken {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for LookupToken {
    type Err = CredentialError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for LookupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for LookupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LookupToken(**redacted**)")
    }
}

/// The pair handed to a guest when their order is confirmed.
///
/// Neither value can be recovered later: there is no account and no email
/// recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdentity {
    /// Display order number.
    pub order_number: OrderNumber,

    /// Secret lookup token.
    pub lookup_token: LookupToken,
}

impl OrderIdentity {
    /// Issue a new identity for an order confirmed on `date`.
    pub fn issue<R: Rng>(date: Date, rng: &mut R) -> Self {
        Self {
            order_number: OrderNumber::generate(date, rng),
            lookup_token: LookupToken::generate(rng),
        }
    }

    /// Issue a new identity for an order confirmed today, in local time.
    pub fn issue_now() -> Self {
        Self::issue(Zoned::now().date(), &mut rand::thread_rng())
    }
}

/// Keep the identity handed out with a checkout session until the customer
/// returns from payment.
///
/// # Errors
///
/// Returns a [`PendingOrderError`] if the identity cannot be written.
pub fn remember_pending_order<S: KeyValueStorage>(
    storage: &mut S,
    identity: &OrderIdentity,
) -> Result<(), PendingOrderError> {
    let serialised = serde_json::to_string(identity)?;

    storage.write(PENDING_ORDER_KEY, &serialised)?;

    Ok(())
}

/// Take the pending identity out of storage.
///
/// The key is removed whatever it held; an unparseable value reads as no
/// pending order.
///
/// # Errors
///
/// Returns a [`StorageError`] if the key cannot be read or removed.
pub fn take_pending_order<S: KeyValueStorage>(
    storage: &mut S,
) -> Result<Option<OrderIdentity>, StorageError> {
    let pending = storage
        .read(PENDING_ORDER_KEY)?
        .and_then(|raw| serde_json::from_str::<OrderIdentity>(&raw).ok());

    storage.remove(PENDING_ORDER_KEY)?;

    Ok(pending)
}
