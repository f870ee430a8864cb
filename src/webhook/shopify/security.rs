//! Signature verification for Shopify webhooks
//!
//! Shopify signs every webhook with HMAC-SHA256 keyed by the app secret and
//! sends the base64 digest in `X-Shopify-Hmac-Sha256`.
//!
//! - The digest covers the raw body bytes as received, never re-serialized JSON
//! - Digests are compared with `subtle::ConstantTimeEq`, so the time taken
//!   does not depend on where the first differing byte is
//! - Call this before parsing the body

use crate::utils;
use base64::{Engine, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;

/// Checks `signature_header` against the HMAC of `raw_body`.
///
/// A mismatch, an undecodable header or an empty secret all yield `false`.
pub fn verify(raw_body: &[u8], signature_header: &str, shared_secret: &[u8]) -> bool {
    let Some(computed) = utils::hmac_sha256(shared_secret, raw_body) else {
        logfire::error!("Shopify app secret is empty, rejecting webhook");
        return false;
    };

    let supplied = match STANDARD.decode(signature_header) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode Shopify HMAC header: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    computed[..].ct_eq(&supplied[..]).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"hush";
    const BODY: &[u8] = br##"{"id":1,"order_number":"#1001","current_total_price":"19.99"}"##;

    fn sign(body: &[u8], secret: &[u8]) -> String {
        STANDARD.encode(utils::hmac_sha256(secret, body).unwrap())
    }

    #[test]
    fn test_valid_signature() {
        assert!(verify(BODY, &sign(BODY, SECRET), SECRET));
    }

    #[test]
    fn test_any_body_byte_change_is_rejected() {
        let signature = sign(BODY, SECRET);

        for i in 0..BODY.len() {
            let mut tampered = BODY.to_vec();
            tampered[i] ^= 0x01;
            assert!(!verify(&tampered, &signature, SECRET), "byte {i} accepted");
        }
    }

    #[test]
    fn test_any_signature_char_change_is_rejected() {
        let signature = sign(BODY, SECRET);

        for i in 0..signature.len() {
            let mut tampered = signature.clone().into_bytes();
            tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(!verify(BODY, &tampered, SECRET), "char {i} accepted");
        }
    }

    #[test]
    fn test_wrong_secret() {
        assert!(!verify(BODY, &sign(BODY, b"other"), SECRET));
    }

    #[test]
    fn test_empty_secret_fails_closed() {
        let signature = STANDARD.encode([0u8; 32]);
        assert!(!verify(BODY, &signature, b""));
        assert!(!verify(b"", &signature, b""));
    }

    #[test]
    fn test_malformed_header() {
        assert!(!verify(BODY, "", SECRET));
        assert!(!verify(BODY, "not base64 !!", SECRET));
        // Hex instead of base64 decodes to the wrong length
        let hex_digest = hex::encode(utils::hmac_sha256(SECRET, BODY).unwrap());
        assert!(!verify(BODY, &hex_digest, SECRET));
    }
}
