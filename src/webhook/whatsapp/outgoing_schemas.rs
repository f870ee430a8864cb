//! # WhatsApp Outgoing Message Schemas
//!
//! Data structures for sending template messages through WhatsApp Business API.

use serde::{Deserialize, Serialize};

/// Template message to send to WhatsApp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingTemplateMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient's WhatsApp ID (phone number or group)
    pub to: String,
    /// Message type, "template"
    #[serde(rename = "type")]
    pub msg_type: String,
    pub template: Template,
}

impl OutgoingTemplateMessage {
    /// Creates a new template message
    pub fn new(to: String, name: String, language_code: String, components: Vec<TemplateComponent>) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            msg_type: "template".to_string(),
            template: Template {
                name,
                language: TemplateLanguage {
                    code: language_code,
                },
                components,
            },
        }
    }

    /// Text values of the body component, in placeholder order
    pub fn body_texts(&self) -> Vec<&str> {
        self.template
            .components
            .iter()
            .filter_map(|component| match component {
                TemplateComponent::Body { parameters } => Some(parameters),
                _ => None,
            })
            .flatten()
            .filter_map(|parameter| match parameter {
                TemplateParameter::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Payloads of the quick-reply buttons, in button order
    pub fn button_payloads(&self) -> Vec<&str> {
        self.template
            .components
            .iter()
            .filter_map(|component| match component {
                TemplateComponent::Button { parameters, .. } => Some(parameters),
                _ => None,
            })
            .flatten()
            .filter_map(|parameter| match parameter {
                TemplateParameter::Payload { payload } => Some(payload.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Approved template reference plus its filled-in components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template name as approved in WhatsApp Manager
    pub name: String,
    pub language: TemplateLanguage,
    pub components: Vec<TemplateComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLanguage {
    /// Language code, e.g. "en_US"
    pub code: String,
}

/// Template component, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateComponent {
    /// Body placeholders `{{1}}..{{n}}`, filled positionally
    Body { parameters: Vec<TemplateParameter> },
    /// One button of the template
    Button {
        /// Button kind, "quick_reply" for reply buttons
        sub_type: String,
        /// Zero-based button position, sent as a string
        index: String,
        parameters: Vec<TemplateParameter>,
    },
}

impl TemplateComponent {
    /// Quick-reply button whose tap is echoed back with `payload`
    pub fn quick_reply(index: usize, payload: String) -> Self {
        TemplateComponent::Button {
            sub_type: "quick_reply".to_string(),
            index: index.to_string(),
            parameters: vec![TemplateParameter::Payload { payload }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateParameter {
    Text { text: String },
    Payload { payload: String },
}

/// Response from WhatsApp API when sending a message
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppMessageResponse {
    /// Messaging product
    pub messaging_product: String,
    /// Array of contacts (recipients)
    #[serde(default)]
    pub contacts: Vec<WhatsAppContact>,
    /// Array of messages sent
    #[serde(default)]
    pub messages: Vec<WhatsAppMessageStatus>,
}

/// Contact information in response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppContact {
    /// WhatsApp ID of the contact
    pub wa_id: String,
    /// Input phone number
    pub input: String,
}

/// Message status in response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppMessageStatus {
    /// Message ID
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_message_wire_shape() {
        let message = OutgoingTemplateMessage::new(
            "5215550000000".into(),
            "order_notification".into(),
            "en_US".into(),
            vec![
                TemplateComponent::Body {
                    parameters: vec![TemplateParameter::Text {
                        text: "#1001".into(),
                    }],
                },
                TemplateComponent::quick_reply(0, "FULFILL_ORDER|1".into()),
            ],
        );

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "5215550000000",
                "type": "template",
                "template": {
                    "name": "order_notification",
                    "language": {"code": "en_US"},
                    "components": [
                        {"type": "body", "parameters": [{"type": "text", "text": "#1001"}]},
                        {
                            "type": "button",
                            "sub_type": "quick_reply",
                            "index": "0",
                            "parameters": [{"type": "payload", "payload": "FULFILL_ORDER|1"}]
                        }
                    ]
                }
            })
        );
    }
}
