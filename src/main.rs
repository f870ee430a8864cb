//! # Order Relay
//!
//! Relays Shopify order webhooks to a WhatsApp recipient as a template message
//! with action buttons, and turns the tapped buttons back into Shopify Admin
//! API mutations.

pub mod config;
pub mod consts;
pub mod metric;
pub mod services;
pub mod utils;
pub mod webhook;

use logfire::config::{MetricsOptions, SendToLogfire};
use ntex::web;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    let app_config = config::init_config()?;

    // Initialize logging and metrics, export only when a token is configured
    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()));
    logfire_config = match &app_config.logfire_token {
        Some(token) => logfire_config
            .send_to_logfire(SendToLogfire::Yes)
            .with_token(token.clone()),
        None => logfire_config.send_to_logfire(SendToLogfire::No),
    };
    let shutdown_handler = logfire_config.finish()?;

    run_server(app_config).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Creates application state with the production clients
fn create_app_state(app_config: &config::AppConfig) -> webhook::AppState {
    webhook::AppState::new(
        app_config,
        Box::new(webhook::whatsapp::client::WhatsAppClient::new(app_config)),
        Box::new(webhook::shopify::client::ShopifyClient::new(app_config)),
    )
}

/// Binds and runs the web server. TLS is terminated by the reverse proxy.
async fn run_server(app_config: config::AppConfig) -> anyhow::Result<()> {
    let server_addr = (
        app_config.web_server_host.clone(),
        app_config.web_server_port,
    );

    logfire::info!(
        "Starting order relay on {host}:{port} ({env})",
        host = server_addr.0.clone(),
        port = i64::from(server_addr.1),
        env = app_config.env.clone()
    );

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(create_app_state(&app_config))
            .configure(webhook::routes::orders)
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
