pub const WEBHOOK_PATH: &str = "/webhooks/orders";

pub const SHOPIFY_HMAC_HEADER: &str = "X-Shopify-Hmac-Sha256";
pub const SHOPIFY_TOPIC_HEADER: &str = "X-Shopify-Topic";
pub const SHOPIFY_SHOP_DOMAIN_HEADER: &str = "X-Shopify-Shop-Domain";
pub const SHOPIFY_ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
pub const WHATSAPP_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

pub const WHATSAPP_OBJECT: &str = "whatsapp_business_account";
pub const HANDSHAKE_MODE: &str = "subscribe";

/// Placeholder rendered for any missing text field of the notification.
pub const MISSING_VALUE: &str = "N/A";
pub const UNKNOWN_CUSTOMER: &str = "Unknown";
