//! Shopify integration: order webhooks in, Admin API mutations out.

pub mod client;
pub mod mutations;
pub mod router;
pub mod schemas;
pub mod security;
