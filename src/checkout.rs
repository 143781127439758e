//! Checkout redirects

use crate::locale::Locale;

/// Placeholder the payment processor replaces with the real session id.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Where the hosted payment page sends the customer afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    /// Landing page after a completed payment.
    pub success: String,

    /// Landing page after an abandoned payment.
    pub cancel: String,
}

impl RedirectUrls {
    /// Redirects for a product purchase, keeping the customer's locale.
    pub fn for_products(site_url: &str, locale: Locale) -> Self {
        Self::build(site_url, locale, "/checkout/success", "/cart")
    }

    /// Redirects for a standalone donation, keeping the customer's locale.
    pub fn for_donation(site_url: &str, locale: Locale) -> Self {
        Self::build(site_url, locale, "/donate/thank-you", "/donate")
    }

    fn build(site_url: &str, locale: Locale, success: &str, cancel: &str) -> Self {
        let site_url = site_url.trim_end_matches('/');

        Self {
            success: format!(
                "{site_url}{}?session_id={SESSION_ID_PLACEHOLDER}",
                locale.localize(success)
            ),
            cancel: format!("{site_url}{}", locale.localize(cancel)),
        }
    }
}

/// Pull the checkout session id out of a success-page query string.
///
/// Accepts the query with or without its leading `?`. An empty value or the
/// unreplaced placeholder counts as absent.
pub fn session_id_from_query(query: &str) -> Option<&str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "session_id")
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty() && *value != SESSION_ID_PLACEHOLDER)
}
