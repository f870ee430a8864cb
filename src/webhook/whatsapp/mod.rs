//! WhatsApp Business integration
//!
//! - [`client`] - Cloud API client for sending messages
//! - [`notifier`] - renders order events into the notification template
//! - [`handshake`] - subscription challenge responder
//! - [`schemas`] / [`outgoing_schemas`] - incoming and outgoing payloads
//! - [`security`] - `X-Hub-Signature-256` verification

pub mod client;
pub mod handshake;
pub mod notifier;
pub mod outgoing_schemas;
pub mod schemas;
pub mod security;
