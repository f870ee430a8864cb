//! Application configuration with security considerations.
//!
//! All values are read once from the environment at startup and handed to the
//! components that need them. Request handlers never consult the environment.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - `AppConfig` intentionally has no `Debug` impl so it can't end up in a log line
//! - Production environments should use secure secret management systems

use anyhow::Context;
use envconfig::Envconfig;

/// Relay configuration.
///
/// Every field maps to the upper-cased environment variable with the same name
/// (`shopify_app_secret` is read from `SHOPIFY_APP_SECRET`).
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// 🔒 SENSITIVE: Logfire write token. Logs stay local when unset.
    pub logfire_token: Option<String>,

    /// 🔒 SENSITIVE: Shopify app secret, the HMAC key of order webhooks
    pub shopify_app_secret: String,

    /// Shopify store domain (NON-SENSITIVE)
    /// Example: "my-store.myshopify.com"
    pub shopify_store_domain: String,

    /// 🔒 SENSITIVE: Shopify Admin API access token
    pub shopify_admin_token: String,

    /// Shopify Admin API version (NON-SENSITIVE)
    #[envconfig(default = "2024-10")]
    pub shopify_api_version: String,

    /// WhatsApp Business phone number ID (SEMI-SENSITIVE)
    /// Security: Restrict access, don't log in production
    pub whatsapp_business_phone_number_id: u64,

    /// 🔒 SENSITIVE: WhatsApp Business authentication token
    pub whatsapp_business_auth: String,

    /// WhatsApp recipient that receives order notifications (SEMI-SENSITIVE)
    pub whatsapp_group_number: String,

    /// 🔒 SENSITIVE: Token expected in the webhook subscription handshake
    pub whatsapp_verify_token: String,

    /// 🔒 SENSITIVE: Meta app secret. When set, replies must carry a valid
    /// `X-Hub-Signature-256` header.
    pub whatsapp_app_secret: Option<String>,

    /// Graph API version used for the send endpoint (NON-SENSITIVE)
    #[envconfig(default = "v18.0")]
    pub whatsapp_graph_version: String,

    /// Approved template used for order notifications (NON-SENSITIVE)
    #[envconfig(default = "order_notification")]
    pub whatsapp_template_name: String,

    /// Language code of the notification template (NON-SENSITIVE)
    #[envconfig(default = "en_US")]
    pub whatsapp_template_language: String,
}

impl AppConfig {
    /// Constructs the WhatsApp Business API endpoint for sending messages
    pub fn whatsapp_send_msg_endpoint(&self) -> String {
        format!(
            "https://graph.facebook.com/{version}/{id}/messages",
            version = self.whatsapp_graph_version,
            id = self.whatsapp_business_phone_number_id
        )
    }

    /// Constructs the Shopify Admin GraphQL endpoint
    pub fn shopify_graphql_endpoint(&self) -> String {
        format!(
            "https://{domain}/admin/api/{version}/graphql.json",
            domain = self.shopify_store_domain,
            version = self.shopify_api_version
        )
    }
}

/// Loads the configuration from the process environment.
pub fn init_config() -> anyhow::Result<AppConfig> {
    AppConfig::init_from_env()
        .context("failed to load configuration, check the environment variables")
}

/// Minimal configuration for unit tests, with every optional value left at its default.
#[cfg(test)]
pub fn test_config() -> AppConfig {
    AppConfig::init_from_hashmap(&tests::required_vars())
        .expect("test configuration should be complete")
}
