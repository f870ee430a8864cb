//! # Order Notifier
//!
//! Renders an [`OrderEvent`] into the `order_notification` template and sends
//! it to the configured WhatsApp recipient.
//!
//! The template body has eight positional placeholders. Their order is fixed
//! by the approved template, so a reordering here would silently show the
//! wrong value in each slot:
//!
//! | # | value |
//! |---|---|
//! | 1 | order number |
//! | 2 | customer name |
//! | 3 | email |
//! | 4 | phone |
//! | 5 | address |
//! | 6 | first item title |
//! | 7 | first item quantity |
//! | 8 | total price |
//!
//! One quick-reply button per [`ActionKind`] follows, in declaration order.

use super::outgoing_schemas::{
    OutgoingTemplateMessage, TemplateComponent, TemplateParameter, WhatsAppMessageResponse,
};
use crate::{
    config::AppConfig,
    consts,
    services::ImplMessagingService,
    utils::non_blank,
    webhook::{
        actions::{ActionKind, ActionPayload},
        errors::WebhookError,
        shopify::schemas::OrderEvent,
    },
};

/// Body placeholder values for `order`, in template order.
pub fn body_parameters(order: &OrderEvent) -> [String; 8] {
    let or_missing = |value: &Option<String>| {
        value
            .clone()
            .unwrap_or_else(|| consts::MISSING_VALUE.to_string())
    };
    let first_item = order.line_items.first();

    [
        or_missing(&order.order_number),
        order
            .customer_name
            .clone()
            .unwrap_or_else(|| consts::UNKNOWN_CUSTOMER.to_string()),
        or_missing(&order.email),
        or_missing(&order.phone),
        order.address.clone(),
        first_item
            .and_then(|item| non_blank(item.title.as_deref()))
            .unwrap_or(consts::MISSING_VALUE)
            .to_string(),
        first_item
            .and_then(|item| item.quantity)
            .unwrap_or_default()
            .to_string(),
        or_missing(&order.total_price),
    ]
}

pub struct Notifier {
    client: ImplMessagingService,
    recipient: String,
    template_name: String,
    template_language: String,
}

impl Notifier {
    pub fn new(client: ImplMessagingService, app_config: &AppConfig) -> Self {
        Self {
            client,
            recipient: app_config.whatsapp_group_number.clone(),
            template_name: app_config.whatsapp_template_name.clone(),
            template_language: app_config.whatsapp_template_language.clone(),
        }
    }

    /// Builds the template message for `order`.
    pub fn build_message(&self, order: &OrderEvent) -> OutgoingTemplateMessage {
        let body = TemplateComponent::Body {
            parameters: body_parameters(order)
                .into_iter()
                .map(|text| TemplateParameter::Text { text })
                .collect(),
        };

        let buttons = ActionKind::ALL.into_iter().enumerate().map(|(index, kind)| {
            TemplateComponent::quick_reply(index, ActionPayload::new(kind, &order.id).encode())
        });

        OutgoingTemplateMessage::new(
            self.recipient.clone(),
            self.template_name.clone(),
            self.template_language.clone(),
            std::iter::once(body).chain(buttons).collect(),
        )
    }

    /// Sends one notification for `order`. No retries: Shopify redelivers the
    /// webhook when this fails and the request answers 502.
    pub async fn notify(&self, order: &OrderEvent) -> Result<WhatsAppMessageResponse, WebhookError> {
        let message = self.build_message(order);

        let response = self.client.send_template(message).await.map_err(|e| {
            logfire::error!(
                "Failed to notify order {order_id}: {error}",
                order_id = order.id.clone(),
                error = e.to_string()
            );
            WebhookError::NotifyFailure(e.to_string())
        })?;

        logfire::info!(
            "Notified order {order_id}, message ids: {message_ids}",
            order_id = order.id.clone(),
            message_ids = response
                .messages
                .iter()
                .map(|m| m.id.as_str())
                .collect::<Vec<_>>()
                .join(",")
        );

        Ok(response)
    }
}
