//! Inquiry Errors

use thiserror::Error;

use crate::{rest::StoreError, validation::ValidationError};

/// Errors raised while submitting an inquiry.
#[derive(Debug, Error)]
pub enum InquiryError {
    /// The form is incomplete or malformed; nothing was submitted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The inquiry could not be stored.
    #[error("failed to submit inquiry")]
    Store(#[from] StoreError),
}
