//! Order lookup service.

use std::sync::Arc;

use ihram::orders::{LookupToken, OrderNumber};
use tracing::{info, instrument};

use crate::orders::{errors::OrderLookupError, models::OrderView, store::OrderStore};

/// Looks up guest orders by order number and lookup token.
pub struct OrderLookupService {
    store: Arc<dyn OrderStore>,
}

impl std::fmt::Debug for OrderLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLookupService").finish_non_exhaustive()
    }
}

impl OrderLookupService {
    /// Create a service reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Find an order by its number and lookup token.
    ///
    /// The token is checked for shape before the store is queried.
    ///
    /// # Errors
    ///
    /// - [`OrderLookupError::MissingCredential`]: either value is blank.
    /// - [`OrderLookupError::MalformedToken`]: the token is not a UUID.
    /// - [`OrderLookupError::NotFound`]: no order matches both values.
    /// - [`OrderLookupError::Store`]: the store could not be queried.
    #[instrument(skip_all, fields(order_number = order_number.trim()))]
    pub async fn lookup(
        &self,
        order_number: &str,
        lookup_token: &str,
    ) -> Result<OrderView, OrderLookupError> {
        if lookup_token.trim().is_empty() {
            return Err(OrderLookupError::MissingCredential);
        }

        let order_number =
            OrderNumber::parse(order_number).map_err(|_empty| OrderLookupError::MissingCredential)?;

        let lookup_token =
            LookupToken::parse(lookup_token).map_err(|_malformed| OrderLookupError::MalformedToken)?;

        let order = self
            .store
            .find_order(&order_number, &lookup_token)
            .await?
            .ok_or(OrderLookupError::NotFound)?;

        info!(status = ?order.status, "order found");

        Ok(order.into())
    }
}
