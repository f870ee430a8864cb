//! Signature verification for requests sent by Meta
//!
//! Meta signs webhook payloads with HMAC-SHA256 using the app secret and sends
//! the result in the `X-Hub-Signature-256` header as `sha256=<hex_signature>`.
//!
//! - The signature MUST be computed on the raw request body bytes, not parsed JSON
//! - The comparison is constant-time (`subtle::ConstantTimeEq`)

use crate::utils;
use subtle::ConstantTimeEq;

/// Verifies the X-Hub-Signature-256 header against the request payload
///
/// # Arguments
///
/// * `signature_header` - The value of the X-Hub-Signature-256 header (e.g., "sha256=abc123...")
/// * `payload` - The raw request body bytes
/// * `app_secret` - The Meta app secret
///
/// # Returns
///
/// `false` when the header is malformed, the secret is empty, or the
/// signatures do not match.
pub fn verify_signature(signature_header: &str, payload: &[u8], app_secret: &str) -> bool {
    let Some(signature_hex) = signature_header.strip_prefix("sha256=") else {
        logfire::warn!("Invalid signature header format: expected 'sha256=' prefix");
        return false;
    };

    let expected_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode signature hex: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let Some(computed_signature) = utils::hmac_sha256(app_secret.as_bytes(), payload) else {
        logfire::error!("WhatsApp app secret is empty, rejecting request");
        return false;
    };

    let is_valid: bool = computed_signature[..].ct_eq(&expected_signature[..]).into();

    if !is_valid {
        logfire::warn!("Webhook signature verification failed: signatures do not match");
    }

    is_valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str) -> String {
        let digest = utils::hmac_sha256(secret.as_bytes(), payload).unwrap();
        format!("sha256={}", hex::encode(digest))
    }

    #[test]
    fn test_verify_signature_valid() {
        let payload = b"{\"object\":\"whatsapp_business_account\"}";
        let header = sign(payload, "test_secret");

        assert!(verify_signature(&header, payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_wrong_secret() {
        let payload = b"{\"test\":\"data\"}";
        let header = sign(payload, "wrong_secret");

        assert!(!verify_signature(&header, payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_invalid_header_format() {
        let payload = b"{\"test\":\"data\"}";

        // Missing sha256= prefix
        assert!(!verify_signature("abc123", payload, "test_secret"));

        // Wrong prefix
        assert!(!verify_signature("sha1=abc123", payload, "test_secret"));

        // Invalid hex characters
        assert!(!verify_signature("sha256=zzzzz", payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_empty_secret() {
        let payload = b"{\"test\":\"data\"}";
        let header = format!("sha256={}", "00".repeat(32));

        assert!(!verify_signature(&header, payload, ""));
    }

    #[test]
    fn test_verify_signature_tampered_payload() {
        let header = sign(b"{\"test\":\"data\"}", "test_secret");

        assert!(!verify_signature(&header, b"{\"test\":\"hacked\"}", "test_secret"));
    }
}
