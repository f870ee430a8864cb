//! Subscription handshake
//!
//! When the webhook URL is registered, WhatsApp sends a GET with `hub.mode`,
//! `hub.verify_token` and `hub.challenge`. Echoing the challenge proves we own
//! the endpoint.

use crate::{consts, webhook::errors::WebhookError};
use serde::Deserialize;

/// Query parameters of a GET on the webhook path. All absent on health checks.
#[derive(Debug, Default, Deserialize)]
pub struct HandshakeQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token from WhatsApp
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl HandshakeQuery {
    /// A handshake is any GET carrying at least one `hub.*` parameter.
    pub fn is_handshake(&self) -> bool {
        self.mode.is_some() || self.verify_token.is_some() || self.challenge.is_some()
    }
}

/// Answers a subscription challenge.
///
/// Plain string equality is enough for this one-time setup token. An empty
/// expected token never matches.
pub fn respond(
    mode: &str,
    token: &str,
    challenge: &str,
    expected_token: &str,
) -> Result<String, WebhookError> {
    if mode != consts::HANDSHAKE_MODE {
        return Err(WebhookError::HandshakeForbidden);
    }

    if expected_token.is_empty() || token != expected_token {
        return Err(WebhookError::HandshakeForbidden);
    }

    Ok(challenge.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_echoes_challenge() {
        assert_eq!(
            respond("subscribe", "verify", "abc123", "verify").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_respond_wrong_mode_or_token() {
        assert!(matches!(
            respond("unsubscribe", "verify", "abc123", "verify"),
            Err(WebhookError::HandshakeForbidden)
        ));
        assert!(matches!(
            respond("subscribe", "nope", "abc123", "verify"),
            Err(WebhookError::HandshakeForbidden)
        ));
        assert!(matches!(
            respond("subscribe", "", "abc123", ""),
            Err(WebhookError::HandshakeForbidden)
        ));
    }

    #[test]
    fn test_query_deserialization() {
        let json = r#"{"hub.mode":"subscribe","hub.verify_token":"test123","hub.challenge":"challenge123"}"#;
        let query: HandshakeQuery = serde_json::from_str(json).unwrap();
        assert!(query.is_handshake());
        assert_eq!(query.mode.as_deref(), Some("subscribe"));
        assert_eq!(query.verify_token.as_deref(), Some("test123"));
        assert_eq!(query.challenge.as_deref(), Some("challenge123"));

        assert!(!HandshakeQuery::default().is_handshake());
    }
}
