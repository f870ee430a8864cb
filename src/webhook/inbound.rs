//! Classification of POST bodies that arrive without a Shopify signature.
//!
//! Shopify and WhatsApp share one URL. Requests carrying
//! `X-Shopify-Hmac-Sha256` are order events; everything else is parsed and
//! told apart by shape.

use super::{
    errors::WebhookError,
    whatsapp::schemas::{ButtonReply, WebhookPayload},
};
use crate::consts;

#[derive(Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// A tapped button on a previous notification
    ButtonReply(ButtonReply),
    /// WhatsApp payload without a button reply (delivery statuses, free text)
    MessagingNotice,
    /// Anything else is assumed to be an order event, which needs a signature
    UnsignedOrder,
}

impl InboundEvent {
    /// Parses `raw_body` and decides which flow handles it.
    pub fn classify(raw_body: &[u8]) -> Result<Self, WebhookError> {
        let document: serde_json::Value = serde_json::from_slice(raw_body)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        let is_whatsapp = document.get("object").and_then(serde_json::Value::as_str)
            == Some(consts::WHATSAPP_OBJECT);
        let has_entries = document.get("entry").is_some_and(serde_json::Value::is_array);

        if !is_whatsapp && !has_entries {
            return Ok(InboundEvent::UnsignedOrder);
        }

        let payload: WebhookPayload = serde_json::from_value(document)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        Ok(match payload.button_reply() {
            Some(reply) => InboundEvent::ButtonReply(reply),
            None if is_whatsapp => InboundEvent::MessagingNotice,
            None => InboundEvent::UnsignedOrder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactive_body(button_id: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{"id": "1", "changes": [{"field": "messages", "value": {
                "messages": [{
                    "from": "5215551234567",
                    "id": "wamid.1",
                    "type": "interactive",
                    "interactive": {"type": "button_reply", "button_reply": {"id": button_id, "title": "x"}}
                }]
            }}]}]
        }))
        .unwrap()
    }

    #[test]
    fn test_classify_button_reply() {
        let event = InboundEvent::classify(&interactive_body("CANCEL_ORDER|9")).unwrap();
        assert_eq!(
            event,
            InboundEvent::ButtonReply(ButtonReply {
                from: "5215551234567".into(),
                id: "CANCEL_ORDER|9".into(),
            })
        );
    }

    #[test]
    fn test_classify_button_reply_without_object_field() {
        let body = br#"{"entry":[{"changes":[{"value":{"messages":[{"interactive":{"button_reply":{"id":"FULFILL_ORDER|1"}}}]}}]}]}"#;
        assert!(matches!(
            InboundEvent::classify(body).unwrap(),
            InboundEvent::ButtonReply(reply) if reply.id == "FULFILL_ORDER|1"
        ));
    }

    #[test]
    fn test_classify_status_update() {
        let body = br#"{"object":"whatsapp_business_account","entry":[{"changes":[{"value":{"statuses":[{"status":"read"}]}}]}]}"#;
        assert_eq!(
            InboundEvent::classify(body).unwrap(),
            InboundEvent::MessagingNotice
        );
    }

    #[test]
    fn test_classify_order_shape() {
        let body = br##"{"id":1,"order_number":"#1001"}"##;
        assert_eq!(
            InboundEvent::classify(body).unwrap(),
            InboundEvent::UnsignedOrder
        );
    }

    #[test]
    fn test_classify_malformed() {
        assert!(matches!(
            InboundEvent::classify(b"{not json"),
            Err(WebhookError::MalformedPayload(_))
        ));
    }
}
