//! Locales

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storefront language. English is served unprefixed, Swedish under `/sv`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, the default locale.
    #[default]
    En,

    /// Swedish.
    Sv,
}

/// A language code that is not served.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl Locale {
    /// Path prefix for this locale, empty for the default.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::En => "",
            Self::Sv => "/sv",
        }
    }

    /// Two-letter language code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sv => "sv",
        }
    }

    /// Work out which locale a request path belongs to.
    pub fn from_path(path: &str) -> Self {
        if path == "/sv" || path.starts_with("/sv/") || path.starts_with("/sv?") {
            Self::Sv
        } else {
            Self::En
        }
    }

    /// Prefix an unprefixed site path with this locale.
    pub fn localize(self, path: &str) -> String {
        let path = path.trim_start_matches('/');

        match (self, path.is_empty()) {
            (Self::En, true) => "/".to_owned(),
            (_, true) => self.prefix().to_owned(),
            (_, false) => format!("{}/{path}", self.prefix()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "sv" => Ok(Self::Sv),
            _ => Err(UnsupportedLocale(value.to_owned())),
        }
    }
}
