//! Admin GraphQL mutations behind each [`ActionKind`].

use crate::webhook::actions::ActionKind;
use serde::{Deserialize, Serialize};

/// Fulfills by order reference, the only id a button carries. Admin API
/// versions whose `FulfillmentInput` only takes `lineItemsByFulfillmentOrder`
/// reject this document; that rejection comes back through the top-level
/// `errors` list and is reported as a user error, not dropped.
const FULFILL_ORDER: &str = r#"mutation fulfillOrder($orderId: ID!) {
  fulfillmentCreate(fulfillment: { orderId: $orderId, notifyCustomer: true }) {
    fulfillment { id status }
    userErrors { field message }
  }
}"#;

const CANCEL_FULFILLMENT: &str = r#"mutation cancelFulfillmentOrder($fulfillmentOrderId: ID!) {
  fulfillmentOrderCancel(id: $fulfillmentOrderId) {
    fulfillmentOrder { id status }
    userErrors { field message }
  }
}"#;

const CANCEL_ORDER: &str = r#"mutation cancelOrder($orderId: ID!) {
  orderCancel(orderId: $orderId, reason: OTHER, refund: false, restock: true) {
    job { id done }
    orderCancelUserErrors { field message code }
  }
}"#;

const READY_FOR_PICKUP: &str = r#"mutation readyForPickup($fulfillmentOrderId: ID!) {
  fulfillmentOrderLineItemsPreparedForPickup(
    input: { lineItemsByFulfillmentOrder: [{ fulfillmentOrderId: $fulfillmentOrderId }] }
  ) {
    userErrors { field message }
  }
}"#;

/// Body of a request to the Admin GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: serde_json::Value,
}

/// Error reported by Shopify for a mutation that was received but not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl ActionKind {
    /// Name of the mutation field in the response `data` object
    pub fn mutation_field(&self) -> &'static str {
        match self {
            ActionKind::FulfillOrder => "fulfillmentCreate",
            ActionKind::CancelFulfillment => "fulfillmentOrderCancel",
            ActionKind::CancelOrder => "orderCancel",
            ActionKind::ReadyForPickup => "fulfillmentOrderLineItemsPreparedForPickup",
        }
    }

    fn user_errors_field(&self) -> &'static str {
        match self {
            ActionKind::CancelOrder => "orderCancelUserErrors",
            _ => "userErrors",
        }
    }

    /// Builds the mutation for this action. The id goes in untouched, as an
    /// order reference or a fulfillment-order reference depending on the action.
    pub fn mutation(&self, order_id: &str) -> GraphqlRequest {
        let (query, variables) = match self {
            ActionKind::FulfillOrder => (FULFILL_ORDER, serde_json::json!({ "orderId": order_id })),
            ActionKind::CancelFulfillment => (
                CANCEL_FULFILLMENT,
                serde_json::json!({ "fulfillmentOrderId": order_id }),
            ),
            ActionKind::CancelOrder => (CANCEL_ORDER, serde_json::json!({ "orderId": order_id })),
            ActionKind::ReadyForPickup => (
                READY_FOR_PICKUP,
                serde_json::json!({ "fulfillmentOrderId": order_id }),
            ),
        };

        GraphqlRequest { query, variables }
    }

    /// Collects top-level GraphQL `errors` and the mutation's user errors.
    pub fn user_errors(&self, response: &serde_json::Value) -> Vec<UserError> {
        let graphql_errors = response
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|error| error.get("message")?.as_str())
            .map(|message| UserError {
                field: None,
                message: message.to_string(),
            });

        let mutation_errors = response
            .pointer(&format!(
                "/data/{}/{}",
                self.mutation_field(),
                self.user_errors_field()
            ))
            .cloned()
            .and_then(|errors| serde_json::from_value::<Vec<UserError>>(errors).ok())
            .unwrap_or_default();

        graphql_errors.chain(mutation_errors).collect()
    }
}
