//! Hosted store REST client
//!
//! Thin wrapper over the hosted relational store's REST interface, shared by
//! the order store and the inquiry sink.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use thiserror::Error;

/// Errors that can occur when talking to the hosted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configured store URL is not an absolute URL.
    #[error("invalid store url: {0}")]
    InvalidUrl(String),

    /// The store did not answer in time.
    #[error("store request timed out")]
    Timeout,

    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    /// The store returned a non-2xx response.
    #[error("store request failed with status {status}: {message}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,

        /// Response body, as returned.
        message: String,
    },

    /// The response body did not match the expected row shape.
    #[error("store returned an unexpected row shape")]
    Schema(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

/// REST client for the hosted store's tables.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: Url,
    key: String,
    http: Client,
}

impl RestClient {
    /// Create a client for the store at `base_url`, authenticating with `key`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidUrl`]: `base_url` is not an absolute http(s) URL.
    /// - [`StoreError::Http`]: the HTTP client could not be built.
    pub fn new(base_url: &str, key: String, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            key,
            http,
        })
    }

    /// URL of `table` under the REST root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if the table URL cannot be formed.
    pub fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|error| StoreError::InvalidUrl(error.to_string()))
    }

    /// Start an authenticated select on `table`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if the table URL cannot be formed.
    pub fn select(&self, table: &str) -> Result<RequestBuilder, StoreError> {
        Ok(self.authorise(self.http.get(self.table_url(table)?)))
    }

    /// Start an authenticated insert into `table`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if the table URL cannot be formed.
    pub fn insert(&self, table: &str) -> Result<RequestBuilder, StoreError> {
        Ok(self
            .authorise(self.http.post(self.table_url(table)?))
            .header("Prefer", "return=minimal"))
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }
}

/// Read a response body, failing on any non-2xx status.
///
/// # Errors
///
/// Returns [`StoreError::UnexpectedResponse`] for a non-2xx status, or a
/// transport error if the body cannot be read.
pub async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    ensure_success(status, body)
}

fn ensure_success(status: StatusCode, body: String) -> Result<String, StoreError> {
    if !status.is_success() {
        return Err(StoreError::UnexpectedResponse {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(body)
}

fn parse_base_url(raw: &str) -> Result<Url, StoreError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let url = Url::parse(&format!("{trimmed}/"))
        .map_err(|error| StoreError::InvalidUrl(format!("{raw}: {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(StoreError::InvalidUrl(raw.to_owned()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn table_urls_sit_under_the_rest_root() -> TestResult {
        let client = RestClient::new(
            "https://store.example/",
            "key".to_owned(),
            Duration::from_secs(1),
        )?;

        assert_eq!(
            client.table_url("orders")?.as_str(),
            "https://store.example/rest/v1/orders"
        );

        Ok(())
    }

    #[test]
    fn base_urls_keep_their_path() -> TestResult {
        let client = RestClient::new(
            "https://example.org/store",
            "key".to_owned(),
            Duration::from_secs(1),
        )?;

        assert_eq!(
            client.table_url("orders")?.as_str(),
            "https://example.org/store/rest/v1/orders"
        );

        Ok(())
    }

    #[test]
    fn relative_and_non_http_urls_are_rejected() {
        for raw in ["/store", "ftp://store.example", ""] {
            assert!(
                matches!(parse_base_url(raw), Err(StoreError::InvalidUrl(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn non_success_statuses_keep_the_body() {
        let result = ensure_success(StatusCode::UNAUTHORIZED, "no key".to_owned());

        assert!(matches!(
            result,
            Err(StoreError::UnexpectedResponse { status: 401, ref message }) if message == "no key"
        ));
    }
}
