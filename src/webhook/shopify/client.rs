//! # Shopify Admin API Client
//!
//! Sends fulfillment lifecycle mutations to the Admin GraphQL endpoint.

use super::mutations::GraphqlRequest;
use crate::{config::AppConfig, consts, services::CommerceService};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Shopify Admin GraphQL client
pub struct ShopifyClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Admin GraphQL endpoint of the store
    endpoint: String,
    /// Admin API access token
    access_token: String,
}

impl ShopifyClient {
    pub fn new(app_config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: app_config.shopify_graphql_endpoint(),
            access_token: app_config.shopify_admin_token.clone(),
        }
    }
}

#[async_trait]
impl CommerceService for ShopifyClient {
    async fn run_mutation(&self, request: GraphqlRequest) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(consts::SHOPIFY_ACCESS_TOKEN_HEADER, &self.access_token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Shopify Admin API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Shopify Admin API returned error status {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Shopify Admin API response")
    }
}
