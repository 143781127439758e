//! Inquiry sink

use async_trait::async_trait;
use mockall::automock;

use crate::{
    inquiries::models::{MosqueSupplyRequest, PartnerInquiry},
    rest::{RestClient, StoreError, read_body},
};

const MOSQUE_REQUESTS_TABLE: &str = "mosque_requests";
const PARTNER_INQUIRIES_TABLE: &str = "partner_inquiries";

/// Where validated inquiries are delivered.
#[automock]
#[async_trait]
pub trait InquirySink: Send + Sync {
    /// Store a mosque-supply request.
    async fn submit_mosque_request(&self, request: &MosqueSupplyRequest) -> Result<(), StoreError>;

    /// Store a partner inquiry.
    async fn submit_partner_inquiry(&self, inquiry: &PartnerInquiry) -> Result<(), StoreError>;
}

/// Inquiries inserted into the hosted store's tables.
#[derive(Debug, Clone)]
pub struct HttpInquirySink {
    rest: RestClient,
}

impl HttpInquirySink {
    /// Create a sink writing through `rest`.
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    async fn insert<T: serde::Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        let response = self.rest.insert(table)?.json(row).send().await?;

        read_body(response).await?;

        Ok(())
    }
}

#[async_trait]
impl InquirySink for HttpInquirySink {
    async fn submit_mosque_request(&self, request: &MosqueSupplyRequest) -> Result<(), StoreError> {
        self.insert(MOSQUE_REQUESTS_TABLE, request).await
    }

    async fn submit_partner_inquiry(&self, inquiry: &PartnerInquiry) -> Result<(), StoreError> {
        self.insert(PARTNER_INQUIRIES_TABLE, inquiry).await
    }
}
