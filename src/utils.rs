//! Helper functions shared by the Shopify and WhatsApp webhook code.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes HMAC-SHA256 of `payload` keyed with `secret`.
///
/// Returns `None` for an empty secret so callers fail closed when the key was
/// never configured.
pub fn hmac_sha256(secret: &[u8], payload: &[u8]) -> Option<[u8; 32]> {
    if secret.is_empty() {
        return None;
    }

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload);
    Some(mac.finalize().into_bytes().into())
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
