//! Inquiry service.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::inquiries::{
    errors::InquiryError,
    models::{MosqueSupplyForm, MosqueSupplyRequest, PartnerInquiry, PartnerInquiryForm},
    sink::InquirySink,
};

/// Validates inquiry forms and hands them to the sink.
pub struct InquiryService {
    sink: Arc<dyn InquirySink>,
}

impl std::fmt::Debug for InquiryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InquiryService").finish_non_exhaustive()
    }
}

impl InquiryService {
    /// Create a service delivering to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn InquirySink>) -> Self {
        Self { sink }
    }

    /// Validate and submit a mosque-supply request.
    ///
    /// # Errors
    ///
    /// - [`InquiryError::Validation`]: the form is invalid; nothing is submitted.
    /// - [`InquiryError::Store`]: the request could not be stored.
    #[instrument(skip_all, fields(locale = %form.locale))]
    pub async fn submit_mosque_request(
        &self,
        form: &MosqueSupplyForm,
    ) -> Result<MosqueSupplyRequest, InquiryError> {
        let request = form.validate()?;

        self.sink.submit_mosque_request(&request).await?;

        info!(quantity = request.quantity, "mosque supply request submitted");

        Ok(request)
    }

    /// Validate and submit a partner inquiry.
    ///
    /// # Errors
    ///
    /// - [`InquiryError::Validation`]: the form is invalid; nothing is submitted.
    /// - [`InquiryError::Store`]: the inquiry could not be stored.
    #[instrument(skip_all, fields(locale = %form.locale))]
    pub async fn submit_partner_inquiry(
        &self,
        form: &PartnerInquiryForm,
    ) -> Result<PartnerInquiry, InquiryError> {
        let inquiry = form.validate()?;

        self.sink.submit_partner_inquiry(&inquiry).await?;

        info!("partner inquiry submitted");

        Ok(inquiry)
    }
}
