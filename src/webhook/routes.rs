use crate::consts;
use ntex::web;

/// Configures the order webhook routes.
///
/// Both platforms are pointed at the same public URL, so no authentication
/// middleware sits in front of it; every request is checked by signature.
///
/// # Routes
/// - `GET /webhooks/orders` - health check and WhatsApp subscription handshake
/// - `POST /webhooks/orders` - Shopify order events and WhatsApp button replies
pub fn orders(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(consts::WEBHOOK_PATH)
            .service((super::orders::probe, super::orders::receive)),
    );
}
