//! Checkout service.

use std::sync::Arc;

use ihram::{
    cart::CartStore,
    checkout::RedirectUrls,
    donations::{DonationAmount, DonationIntent},
    locale::Locale,
    money::round2,
    pricing::{PriceComposer, ensure_product_checkout},
    storage::KeyValueStorage,
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::{
    checkout::{
        client::CheckoutClient,
        errors::CheckoutError,
        guard::InFlight,
        models::{
            CheckoutRequest, CheckoutSession, DonationCheckoutRequest, ProductCheckoutRequest,
        },
    },
    validation,
};

/// Validates checkouts locally and requests hosted sessions for them.
///
/// Nothing here mutates the cart: it is only cleared once the customer returns
/// from a completed payment.
pub struct CheckoutService {
    client: Arc<dyn CheckoutClient>,
    composer: PriceComposer,
    site_url: String,
    in_flight: InFlight,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("composer", &self.composer)
            .field("site_url", &self.site_url)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    /// Create a service sending requests through `client`.
    #[must_use]
    pub fn new(
        client: Arc<dyn CheckoutClient>,
        composer: PriceComposer,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            composer,
            site_url: site_url.into(),
            in_flight: InFlight::default(),
        }
    }

    /// Request a session for the cart's contents plus an optional donation.
    ///
    /// The donation is sent as the composer quotes it, including any covered
    /// processor fees, so the charge matches the quoted grand total.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to buy; no request is made.
    /// - [`CheckoutError::InFlight`]: another request is outstanding.
    /// - Any error from the [`CheckoutClient`].
    #[instrument(skip_all, fields(items = cart.total_items(), cover_fees, %locale))]
    pub async fn checkout_cart<S: KeyValueStorage>(
        &self,
        cart: &CartStore<S>,
        donation: DonationAmount,
        cover_fees: bool,
        locale: Locale,
    ) -> Result<CheckoutSession, CheckoutError> {
        ensure_product_checkout(cart.total_items())?;

        let donation_total = donation.total(cover_fees, self.composer.fees());

        let request = CheckoutRequest::Products(ProductCheckoutRequest {
            items: cart.checkout_lines(),
            donation: (donation_total > Decimal::ZERO).then_some(donation_total),
            success_url: None,
            cancel_url: None,
        })
        .with_redirects(RedirectUrls::for_products(&self.site_url, locale));

        self.request(&request).await
    }

    /// Request a session for a standalone donation.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`]: a receipt was requested without a valid email.
    /// - [`CheckoutError::Donation`]: the charge is below the minimum; no request is made.
    /// - [`CheckoutError::InFlight`]: another request is outstanding.
    /// - Any error from the [`CheckoutClient`].
    #[instrument(skip_all, fields(frequency = %intent.frequency, direction = %intent.direction, %locale))]
    pub async fn donate(
        &self,
        intent: &DonationIntent,
        locale: Locale,
    ) -> Result<CheckoutSession, CheckoutError> {
        let receipt_email = if intent.wants_receipt {
            Some(validation::email(
                "receipt email",
                intent.receipt_email.as_deref().unwrap_or_default(),
            )?)
        } else {
            None
        };

        let charge = intent.charge(self.composer.fees())?;

        info!(%charge, cover_fees = intent.cover_fees, "donation passed minimum charge");

        let request = CheckoutRequest::Donation(DonationCheckoutRequest {
            amount: round2(intent.amount.base()),
            frequency: intent.frequency,
            direction: intent.direction,
            anonymous: intent.anonymous,
            wants_receipt: intent.wants_receipt,
            receipt_email,
            cover_fees: intent.cover_fees,
            success_url: None,
            cancel_url: None,
        })
        .with_redirects(RedirectUrls::for_donation(&self.site_url, locale));

        self.request(&request).await
    }

    /// The composer used for donation charges.
    pub fn composer(&self) -> &PriceComposer {
        &self.composer
    }

    async fn request(&self, request: &CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        let Some(_guard) = self.in_flight.try_acquire() else {
            warn!("checkout already in progress");

            return Err(CheckoutError::InFlight);
        };

        match self.client.create_session(request).await {
            Ok(session) => {
                info!(host = session.url.host_str(), "checkout session created");

                Ok(session)
            }
            Err(error) => {
                warn!(%error, "checkout session request failed");

                Err(error)
            }
        }
    }
}
