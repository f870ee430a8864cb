//! # WhatsApp Webhook Schemas
//!
//! The subset of the WhatsApp Business webhook payload the relay reads: the
//! first message of the first change, and the button the user tapped.
//! Unknown fields are ignored and most fields default, since only the
//! button reply matters here.

use serde::{Deserialize, Serialize};

/// Root webhook payload from WhatsApp
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, typically "whatsapp_business_account"
    #[serde(default)]
    pub object: String,
    /// Array of entry objects containing the actual data
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Entry object containing changes
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Entry {
    /// Business Account ID
    #[serde(default)]
    pub id: String,
    /// Array of changes that occurred
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// Change object containing the actual webhook data
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Change {
    /// The field that changed (e.g., "messages")
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

/// Value object containing messages
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Value {
    /// Array of messages received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

/// Message object
#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    /// Sender's WhatsApp ID (phone number)
    #[serde(default)]
    pub from: String,
    /// Message ID
    #[serde(default)]
    pub id: String,
    /// Message type ("interactive", "button", "text", ...)
    #[serde(rename = "type", default)]
    pub msg_type: String,
    /// Interactive reply content (if type is "interactive")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<Interactive>,
    /// Template quick-reply content (if type is "button")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonMessage>,
}

/// Interactive message reply
#[derive(Debug, Deserialize, Serialize)]
pub struct Interactive {
    /// "button_reply" or "list_reply"
    #[serde(rename = "type", default)]
    pub interactive_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_reply: Option<ReplyOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_reply: Option<ReplyOption>,
}

/// The option the user picked
#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyOption {
    /// Identifier set when the message was sent
    pub id: String,
    /// Title displayed to the user
    #[serde(default)]
    pub title: String,
}

/// Quick-reply button tapped on a template message
#[derive(Debug, Deserialize, Serialize)]
pub struct ButtonMessage {
    /// Payload set when the template was sent
    pub payload: String,
    /// Button label
    #[serde(default)]
    pub text: String,
}

/// A tapped button, reduced to what routing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonReply {
    /// Sender's WhatsApp ID
    pub from: String,
    /// Raw button identifier, an encoded `ActionPayload`
    pub id: String,
}

impl WebhookPayload {
    fn first_message(&self) -> Option<&Message> {
        self.entry
            .first()?
            .changes
            .first()?
            .value
            .messages
            .as_ref()?
            .first()
    }

    /// Button identifier at `entry[0].changes[0].value.messages[0]`, read from
    /// `interactive.button_reply.id` or, for template buttons, `button.payload`.
    pub fn button_reply(&self) -> Option<ButtonReply> {
        let message = self.first_message()?;

        let id = message
            .interactive
            .as_ref()
            .and_then(|interactive| interactive.button_reply.as_ref())
            .map(|reply| reply.id.clone())
            .or_else(|| message.button.as_ref().map(|button| button.payload.clone()))?;

        Some(ButtonReply {
            from: message.from.clone(),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_reply_from_interactive() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "123456",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {"display_phone_number": "15550000000", "phone_number_id": "1"},
                        "messages": [{
                            "from": "5215551234567",
                            "id": "wamid.1",
                            "timestamp": "1700000000",
                            "type": "interactive",
                            "interactive": {
                                "type": "button_reply",
                                "button_reply": {"id": "FULFILL_ORDER|42", "title": "Fulfill"}
                            }
                        }]
                    }
                }]
            }]
        }))
        .unwrap();

        assert_eq!(
            payload.button_reply(),
            Some(ButtonReply {
                from: "5215551234567".into(),
                id: "FULFILL_ORDER|42".into(),
            })
        );
    }

    #[test]
    fn test_button_reply_from_template_button() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"value": {"messages": [{
                "from": "5215551234567",
                "type": "button",
                "button": {"payload": "CANCEL_ORDER|7", "text": "Cancel order"}
            }]}}]}]
        }))
        .unwrap();

        assert_eq!(payload.button_reply().unwrap().id, "CANCEL_ORDER|7");
    }

    #[test]
    fn test_no_button_reply_on_status_update() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"field": "messages", "value": {
                "statuses": [{"id": "wamid.1", "status": "delivered"}]
            }}]}]
        }))
        .unwrap();

        assert!(payload.button_reply().is_none());
    }
}
