//! Order webhook endpoint handlers
//!
//! One URL serves both platforms:
//! - `GET` answers health checks and the WhatsApp subscription handshake
//! - `POST` takes Shopify order events (signed with `X-Shopify-Hmac-Sha256`)
//!   and WhatsApp button replies
//!
//! Every request is handled in-line. The response reflects the outcome of the
//! single outbound call it triggers, so Shopify retries when a notification
//! could not be sent.

use super::{
    AppState,
    actions::ActionPayload,
    errors::WebhookError,
    inbound::InboundEvent,
    shopify::{
        self,
        router::MutationResult,
        schemas::{OrderEvent, OrderWebhookPayload},
    },
    whatsapp::{
        self,
        handshake::{self, HandshakeQuery},
        schemas::ButtonReply,
    },
};
use crate::{consts, metric};
use ntex::{util::Bytes, web};
use tracing::Instrument;

fn header_str<'a>(req: &'a web::HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .map(|value| value.to_str().unwrap_or_default())
}

/// Health check and subscription handshake (GET)
///
/// # Returns
/// - 204 when no `hub.*` parameter is present
/// - 200 with the challenge as plain text when the handshake succeeds
/// - 403 otherwise
#[web::get("")]
pub async fn probe(
    query: web::types::Query<HandshakeQuery>,
    app_state: web::types::State<AppState>,
) -> Result<web::HttpResponse, web::Error> {
    if !query.is_handshake() {
        return Ok(web::HttpResponse::NoContent().finish());
    }

    let challenge = handshake::respond(
        query.mode.as_deref().unwrap_or_default(),
        query.verify_token.as_deref().unwrap_or_default(),
        query.challenge.as_deref().unwrap_or_default(),
        &app_state.whatsapp_verify_token,
    )
    .inspect_err(|e| metric::incr_webhook_statds(e.outcome()))?;

    logfire::info!("Webhook verification successful");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(challenge))
}

/// Webhook receiver (POST)
///
/// # Returns
/// - 200 `{"success":true}` once the order notification was sent
/// - 200 with the routing outcome for button replies
/// - 400 malformed JSON, 401 bad signature, 502 WhatsApp send failed
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<web::HttpResponse, web::Error> {
    let result = dispatch(&req, &body, &app_state)
        .instrument(logfire::span!("order_webhook"))
        .await;

    match result {
        Ok(response) => Ok(response),
        Err(e) => {
            metric::incr_webhook_statds(e.outcome());
            Err(e.into())
        }
    }
}

async fn dispatch(
    req: &web::HttpRequest,
    body: &[u8],
    app_state: &AppState,
) -> Result<web::HttpResponse, WebhookError> {
    if let Some(signature) = header_str(req, consts::SHOPIFY_HMAC_HEADER) {
        return handle_order_event(req, body, signature, app_state).await;
    }

    if let Some(app_secret) = &app_state.whatsapp_app_secret {
        let signature = header_str(req, consts::WHATSAPP_SIGNATURE_HEADER).unwrap_or_default();
        if !whatsapp::security::verify_signature(signature, body, app_secret) {
            return Err(WebhookError::AuthenticationFailure);
        }
    }

    match InboundEvent::classify(body)? {
        InboundEvent::ButtonReply(reply) => Ok(handle_button_reply(reply, app_state).await),
        InboundEvent::MessagingNotice => {
            metric::incr_webhook_statds("ignored");
            Ok(web::HttpResponse::Ok().json(&serde_json::json!({
                "status": "ignored"
            })))
        }
        InboundEvent::UnsignedOrder => {
            logfire::warn!("Order payload without Shopify signature header");
            Err(WebhookError::AuthenticationFailure)
        }
    }
}

/// Verify, parse, normalize, notify. Nothing is parsed before the signature
/// checks out.
async fn handle_order_event(
    req: &web::HttpRequest,
    body: &[u8],
    signature: &str,
    app_state: &AppState,
) -> Result<web::HttpResponse, WebhookError> {
    let topic = header_str(req, consts::SHOPIFY_TOPIC_HEADER)
        .unwrap_or("unknown")
        .to_string();
    let shop = header_str(req, consts::SHOPIFY_SHOP_DOMAIN_HEADER)
        .unwrap_or("unknown")
        .to_string();

    if !shopify::security::verify(body, signature, app_state.shopify_app_secret.as_bytes()) {
        logfire::warn!(
            "Rejected {topic} webhook from {shop}: invalid signature",
            topic = topic.clone(),
            shop = shop.clone()
        );
        return Err(WebhookError::AuthenticationFailure);
    }

    let payload: OrderWebhookPayload = serde_json::from_slice(body)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;
    let order = OrderEvent::try_from(payload)?;

    logfire::info!(
        "Received {topic} for order {order_id} from {shop}",
        topic = topic,
        order_id = order.id.clone(),
        shop = shop
    );

    app_state.notifier.notify(&order).await?;
    metric::incr_webhook_statds("notified");

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({ "success": true })))
}

/// Replies are always acknowledged with 200, so WhatsApp does not redeliver
/// them; the body says what happened.
async fn handle_button_reply(reply: ButtonReply, app_state: &AppState) -> web::HttpResponse {
    logfire::info!(
        "Button reply {id} from {from}",
        id = reply.id.clone(),
        from = reply.from.clone()
    );

    let result = match ActionPayload::split(&reply.id) {
        Ok((action_kind, order_id)) => app_state.action_router.route(action_kind, order_id).await,
        Err(e) => {
            logfire::warn!(
                "Undecodable button id {id}: {error}",
                id = reply.id.clone(),
                error = e.to_string()
            );
            metric::incr_action_statds("unhandled");
            MutationResult::Unhandled { action: reply.id }
        }
    };

    web::HttpResponse::Ok().json(&result)
}
