use crate::webhook::{
    shopify::mutations::GraphqlRequest,
    whatsapp::outgoing_schemas::{OutgoingTemplateMessage, WhatsAppMessageResponse},
};
use async_trait::async_trait;

/// Outbound side of the messaging platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingService: Send + Sync {
    async fn send_template(
        &self,
        message: OutgoingTemplateMessage,
    ) -> anyhow::Result<WhatsAppMessageResponse>;
}

/// Outbound side of the commerce platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommerceService: Send + Sync {
    /// Runs one GraphQL mutation and returns the raw response document,
    /// including any `errors` / `userErrors` the platform reported.
    async fn run_mutation(&self, request: GraphqlRequest) -> anyhow::Result<serde_json::Value>;
}

pub type ImplMessagingService = Box<dyn MessagingService>;
pub type ImplCommerceService = Box<dyn CommerceService>;
