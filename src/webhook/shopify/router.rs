//! # Action Router
//!
//! Turns a tapped WhatsApp button into exactly one Admin API mutation.
//!
//! No fulfillment state is tracked here. Shopify rejects illegal transitions
//! (cancelling a fulfilled order, ...) and those rejections come back as user
//! errors in the result.

use super::mutations::UserError;
use crate::{metric, services::ImplCommerceService, webhook::actions::ActionKind};
use serde::Serialize;

/// Outcome of routing one reply. Every variant is acknowledged with 200.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MutationResult {
    /// Mutation was delivered; Shopify may still have reported user errors
    Dispatched {
        #[serde(rename = "handled")]
        action: ActionKind,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        user_errors: Vec<UserError>,
    },
    /// The call to Shopify failed
    Failed {
        #[serde(rename = "handled")]
        action: ActionKind,
        error: String,
    },
    /// Action kind not recognized, nothing was sent
    Unhandled {
        #[serde(rename = "unhandled")]
        action: String,
    },
}

pub struct ActionRouter {
    client: ImplCommerceService,
}

impl ActionRouter {
    pub fn new(client: ImplCommerceService) -> Self {
        Self { client }
    }

    /// Dispatches the mutation mapped to `action_kind` for `order_id`.
    ///
    /// Unknown kinds come from a free-form external payload, so they are
    /// logged and acknowledged without any outbound call.
    pub async fn route(&self, action_kind: &str, order_id: &str) -> MutationResult {
        let action: ActionKind = match action_kind.parse() {
            Ok(action) => action,
            Err(_) => {
                logfire::warn!(
                    "Unhandled action {action} for order {order_id}",
                    action = action_kind.to_string(),
                    order_id = order_id.to_string()
                );
                metric::incr_action_statds("unhandled");
                return MutationResult::Unhandled {
                    action: action_kind.to_string(),
                };
            }
        };

        logfire::info!(
            "Dispatching {action} for order {order_id}",
            action = action.as_str(),
            order_id = order_id.to_string()
        );

        match self.client.run_mutation(action.mutation(order_id)).await {
            Ok(response) => {
                let user_errors = action.user_errors(&response);
                if !user_errors.is_empty() {
                    logfire::warn!(
                        "Shopify rejected {action} for order {order_id}: {errors}",
                        action = action.as_str(),
                        order_id = order_id.to_string(),
                        errors = user_errors
                            .iter()
                            .map(|e| e.message.as_str())
                            .collect::<Vec<_>>()
                            .join("; ")
                    );
                }
                metric::incr_action_statds(action.as_str());
                MutationResult::Dispatched {
                    action,
                    user_errors,
                }
            }
            Err(e) => {
                logfire::error!(
                    "Failed to dispatch {action} for order {order_id}: {error}",
                    action = action.as_str(),
                    order_id = order_id.to_string(),
                    error = e.to_string()
                );
                metric::incr_action_statds("dispatch_failed");
                MutationResult::Failed {
                    action,
                    error: e.to_string(),
                }
            }
        }
    }
}
