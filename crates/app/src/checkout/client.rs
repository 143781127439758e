//! Checkout session client

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use ihram::orders::{LookupToken, OrderNumber};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::checkout::{
    errors::CheckoutError,
    models::{CheckoutRequest, CheckoutSession, SessionResponse},
};

/// Creates hosted checkout sessions.
#[automock]
#[async_trait]
pub trait CheckoutClient: Send + Sync {
    /// Ask the payment processor for a hosted checkout session.
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}

/// HTTP client for the checkout-session endpoints.
#[derive(Debug, Clone)]
pub struct HttpCheckoutClient {
    api_url: String,
    http: Client,
}

impl HttpCheckoutClient {
    /// Create a client for the endpoints under `api_url`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidUrl`]: `api_url` is not an absolute http(s) URL.
    /// - [`CheckoutError::Http`]: the HTTP client could not be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, CheckoutError> {
        let api_url = api_url.trim().trim_end_matches('/').to_owned();

        absolute_url(&api_url)?;

        Ok(Self {
            api_url,
            http: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl CheckoutClient for HttpCheckoutClient {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = format!("{}/{}", self.api_url, request.path());

        debug!(%url, "creating checkout session");

        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        parse_session_response(status, &body)
    }
}

/// Turn a checkout endpoint response into a session.
///
/// # Errors
///
/// - [`CheckoutError::Rejected`]: a non-2xx status, or an `error` in the body.
/// - [`CheckoutError::InvalidResponse`]: a 2xx body that is not JSON.
/// - [`CheckoutError::MissingUrl`]: no `url` in the body.
/// - [`CheckoutError::InvalidUrl`]: the `url` is not an absolute http(s) URL.
/// - [`CheckoutError::InvalidLookupToken`]: a `lookupToken` is present but
///   is not a hyphenated version 1-5 UUID.
pub fn parse_session_response(
    status: StatusCode,
    body: &str,
) -> Result<CheckoutSession, CheckoutError> {
    let parsed = serde_json::from_str::<SessionResponse>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|response| response.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });

        return Err(CheckoutError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let response = parsed.map_err(CheckoutError::InvalidResponse)?;

    if let Some(message) = response.error {
        return Err(CheckoutError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let url = response
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(CheckoutError::MissingUrl)?;

    let url = absolute_url(url.trim())?;

    let order_number = response
        .order_number
        .and_then(|number| OrderNumber::parse(&number).ok());

    let lookup_token = response
        .lookup_token
        .filter(|token| !token.trim().is_empty())
        .map(|token| LookupToken::parse(&token))
        .transpose()
        .map_err(CheckoutError::InvalidLookupToken)?;

    Ok(CheckoutSession {
        url,
        order_number,
        lookup_token,
    })
}

fn absolute_url(raw: &str) -> Result<Url, CheckoutError> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| CheckoutError::InvalidUrl(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use ihram::orders::CredentialError;
    use testresult::TestResult;

    use crate::checkout::models::ProductCheckoutRequest;

    use super::*;

    #[test]
    fn session_url_is_returned() -> TestResult {
        let session = parse_session_response(
            StatusCode::OK,
            r#"{"url":"https://checkout.example/c/pay/cs_123"}"#,
        )?;

        assert_eq!(session.url.as_str(), "https://checkout.example/c/pay/cs_123");

        Ok(())
    }

    #[test]
    fn order_credentials_are_returned_with_the_session() -> TestResult {
        let session = parse_session_response(
            StatusCode::OK,
            r#"{
                "url": "https://checkout.example/c/pay/cs_123",
                "orderNumber": " ORD-20261018-K7Q2Z ",
                "lookupToken": "9f0a2b6e-3d8a-4c55-9b0e-6c9a0e2d1f3a"
            }"#,
        )?;

        let identity = session.identity().expect("both credentials expected");

        assert_eq!(identity.order_number.as_str(), "ORD-20261018-K7Q2Z");
        assert_eq!(
            identity.lookup_token.to_string(),
            "9f0a2b6e-3d8a-4c55-9b0e-6c9a0e2d1f3a"
        );

        Ok(())
    }

    #[test]
    fn sessions_without_credentials_have_no_identity() -> TestResult {
        for body in [
            r#"{"url":"https://checkout.example/c/pay/cs_123"}"#,
            r#"{"url":"https://checkout.example/c/pay/cs_123","orderNumber":"  ","lookupToken":""}"#,
            r#"{"url":"https://checkout.example/c/pay/cs_123","orderNumber":"ORD-20261018-K7Q2Z"}"#,
        ] {
            let session = parse_session_response(StatusCode::OK, body)?;

            assert_eq!(session.identity(), None, "{body}");
        }

        Ok(())
    }

    #[test]
    fn malformed_lookup_tokens_are_rejected() {
        let result = parse_session_response(
            StatusCode::OK,
            r#"{"url":"https://checkout.example/c/pay/cs_123","orderNumber":"ORD-1","lookupToken":"not-a-uuid"}"#,
        );

        assert!(matches!(
            result,
            Err(CheckoutError::InvalidLookupToken(CredentialError::MalformedToken))
        ));
    }

    #[test]
    fn error_bodies_are_rejections() {
        let result =
            parse_session_response(StatusCode::BAD_REQUEST, r#"{"error":"Unknown product"}"#);

        assert!(matches!(
            result,
            Err(CheckoutError::Rejected { status: 400, ref message }) if message == "Unknown product"
        ));
    }

    #[test]
    fn non_json_failures_use_the_status_reason() {
        let result = parse_session_response(StatusCode::BAD_GATEWAY, "<html>upstream</html>");

        assert!(matches!(
            result,
            Err(CheckoutError::Rejected { status: 502, ref message }) if message == "Bad Gateway"
        ));
    }

    #[test]
    fn error_in_a_success_body_is_still_a_rejection() {
        let result = parse_session_response(StatusCode::OK, r#"{"error":"Stripe down"}"#);

        assert!(matches!(result, Err(CheckoutError::Rejected { status: 200, .. })));
    }

    #[test]
    fn missing_and_blank_urls_are_rejected() {
        for body in ["{}", r#"{"url":null}"#, r#"{"url":"  "}"#] {
            assert!(
                matches!(
                    parse_session_response(StatusCode::OK, body),
                    Err(CheckoutError::MissingUrl)
                ),
                "{body}"
            );
        }
    }

    #[test]
    fn relative_urls_are_rejected() {
        assert!(matches!(
            parse_session_response(StatusCode::OK, r#"{"url":"/pay/cs_123"}"#),
            Err(CheckoutError::InvalidUrl(_))
        ));
    }

    #[test]
    fn garbage_success_bodies_are_invalid() {
        assert!(matches!(
            parse_session_response(StatusCode::OK, "ok"),
            Err(CheckoutError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn silent_endpoint_times_out() -> TestResult {
        // Accepted by the kernel backlog, never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;

        let client =
            HttpCheckoutClient::new(&format!("http://{addr}"), Duration::from_millis(300))?;

        let request = CheckoutRequest::Products(ProductCheckoutRequest {
            items: Vec::new(),
            donation: None,
            success_url: None,
            cancel_url: None,
        });

        let result = client.create_session(&request).await;

        assert!(matches!(result, Err(CheckoutError::Timeout)), "{result:?}");

        drop(listener);

        Ok(())
    }

    #[test]
    fn client_requires_an_absolute_api_url() {
        assert!(matches!(
            HttpCheckoutClient::new("/api", Duration::from_secs(1)),
            Err(CheckoutError::InvalidUrl(_))
        ));
    }
}
