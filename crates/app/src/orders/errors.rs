//! Order Lookup Errors

use thiserror::Error;

use crate::rest::StoreError;

/// Errors returned from an order lookup.
///
/// A wrong order number and a wrong token produce the same [`NotFound`], so a
/// caller cannot tell which half was wrong.
///
/// [`NotFound`]: OrderLookupError::NotFound
#[derive(Debug, Error)]
pub enum OrderLookupError {
    /// The order number or the lookup token was blank.
    #[error("order number and lookup token are both required")]
    MissingCredential,

    /// The lookup token is not a UUID.
    #[error("lookup token is malformed")]
    MalformedToken,

    /// No order matches the pair.
    #[error("order not found")]
    NotFound,

    /// The store could not be queried.
    #[error("order store unavailable")]
    Store(#[from] StoreError),
}
