//! Order store

use async_trait::async_trait;
use ihram::orders::{LookupToken, OrderNumber};
use mockall::automock;

use crate::{
    orders::models::OrderRecord,
    rest::{RestClient, StoreError, read_body},
};

const ORDERS_TABLE: &str = "orders";
const ORDER_COLUMNS: &str = "*,payments(amount,status,created_at)";

/// Read access to stored orders.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Find the order matching both the number and the token.
    async fn find_order(
        &self,
        order_number: &OrderNumber,
        lookup_token: &LookupToken,
    ) -> Result<Option<OrderRecord>, StoreError>;
}

/// Orders read from the hosted store's REST interface.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    rest: RestClient,
}

impl HttpOrderStore {
    /// Create a store reading through `rest`.
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn find_order(
        &self,
        order_number: &OrderNumber,
        lookup_token: &LookupToken,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let response = self
            .rest
            .select(ORDERS_TABLE)?
            .query(&[
                ("select", ORDER_COLUMNS.to_owned()),
                ("order_number", format!("eq.{order_number}")),
                ("lookup_token", format!("eq.{lookup_token}")),
                ("limit", "1".to_owned()),
            ])
            .send()
            .await?;

        let body = read_body(response).await?;

        matching_order(&body, order_number, lookup_token)
    }
}

/// Pick the row matching both halves out of a select response.
fn matching_order(
    body: &str,
    order_number: &OrderNumber,
    lookup_token: &LookupToken,
) -> Result<Option<OrderRecord>, StoreError> {
    let rows: Vec<OrderRecord> = serde_json::from_str(body)?;

    Ok(rows.into_iter().find(|row| {
        row.order_number == order_number.as_str() && row.lookup_token == *lookup_token
    }))
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, time::Duration};

    use testresult::TestResult;

    use super::*;

    const TOKEN: &str = "9f0a2b6e-3d8a-4c55-9b0e-6c9a0e2d1f3a";

    fn row(order_number: &str, token: &str) -> String {
        format!(
            r#"{{"order_number":"{order_number}","lookup_token":"{token}","status":"paid","total":358.0,"created_at":"2026-10-18T09:29:41Z"}}"#
        )
    }

    #[test]
    fn empty_result_is_none() -> TestResult {
        let found = matching_order(
            "[]",
            &OrderNumber::parse("ORD-20261018-K7Q2Z")?,
            &LookupToken::parse(TOKEN)?,
        )?;

        assert!(found.is_none());

        Ok(())
    }

    #[test]
    fn rows_must_match_both_halves() -> TestResult {
        let body = format!(
            "[{}]",
            row("ORD-20261018-OTHER", "2ed6657d-e927-568b-95e1-2665a8aea6a2")
        );

        let found = matching_order(
            &body,
            &OrderNumber::parse("ORD-20261018-K7Q2Z")?,
            &LookupToken::parse(TOKEN)?,
        )?;

        assert!(found.is_none());

        Ok(())
    }

    #[test]
    fn matching_row_is_returned() -> TestResult {
        let body = format!("[{}]", row("ORD-20261018-K7Q2Z", TOKEN));

        let found = matching_order(
            &body,
            &OrderNumber::parse("ORD-20261018-K7Q2Z")?,
            &LookupToken::parse(TOKEN)?,
        )?;

        assert_eq!(
            found.map(|order| order.order_number).as_deref(),
            Some("ORD-20261018-K7Q2Z")
        );

        Ok(())
    }

    #[test]
    fn unexpected_row_shapes_are_schema_errors() -> TestResult {
        let result = matching_order(
            r#"[{"order_number":"ORD-1"}]"#,
            &OrderNumber::parse("ORD-1")?,
            &LookupToken::parse(TOKEN)?,
        );

        assert!(matches!(result, Err(StoreError::Schema(_))));

        Ok(())
    }

    #[tokio::test]
    async fn silent_store_times_out() -> TestResult {
        // Accepted by the kernel backlog, never answered.
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;

        let rest = RestClient::new(
            &format!("http://{addr}"),
            "anon-key".to_owned(),
            Duration::from_millis(300),
        )?;

        let result = HttpOrderStore::new(rest)
            .find_order(
                &OrderNumber::parse("ORD-20261018-K7Q2Z")?,
                &LookupToken::parse(TOKEN)?,
            )
            .await;

        assert!(matches!(result, Err(StoreError::Timeout)), "{result:?}");

        drop(listener);

        Ok(())
    }
}
