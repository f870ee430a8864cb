//! Webhook relay between Shopify and WhatsApp
//!
//! ## Modules
//!
//! - [`orders`] - HTTP handlers of the shared webhook URL
//! - [`shopify`] - order payloads, signature check and the Admin API mutations
//! - [`whatsapp`] - template notifications, reply payloads and the handshake
//! - [`actions`] - button actions and their `KIND|order_id` encoding
//! - [`inbound`] - tells unsigned POST bodies apart

pub mod actions;
pub mod errors;
pub mod inbound;
pub mod orders;
pub mod routes;
pub mod shopify;
pub mod whatsapp;

use crate::{
    config::AppConfig,
    services::{ImplCommerceService, ImplMessagingService},
};
use shopify::router::ActionRouter;
use whatsapp::notifier::Notifier;

/// Shared state of the webhook handlers. Built once at startup from
/// [`AppConfig`]; handlers never read the environment.
pub struct AppState {
    pub shopify_app_secret: String,
    pub whatsapp_app_secret: Option<String>,
    pub whatsapp_verify_token: String,
    pub notifier: Notifier,
    pub action_router: ActionRouter,
}

impl AppState {
    pub fn new(
        app_config: &AppConfig,
        messaging: ImplMessagingService,
        commerce: ImplCommerceService,
    ) -> Self {
        Self {
            shopify_app_secret: app_config.shopify_app_secret.clone(),
            whatsapp_app_secret: app_config
                .whatsapp_app_secret
                .clone()
                .filter(|secret| !secret.is_empty()),
            whatsapp_verify_token: app_config.whatsapp_verify_token.clone(),
            notifier: Notifier::new(messaging, app_config),
            action_router: ActionRouter::new(commerce),
        }
    }
}
