//! # Shopify Order Webhook Schemas
//!
//! [`OrderWebhookPayload`] mirrors the fields of an `orders/*` webhook the relay
//! reads. [`OrderEvent`] is the normalized order handed to the notifier.

use crate::{utils::non_blank, webhook::errors::WebhookError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier that Shopify may send either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PlatformId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformId::Number(n) => write!(f, "{n}"),
            PlatformId::Text(s) => f.write_str(s),
        }
    }
}

/// Raw order payload as delivered by Shopify
#[derive(Debug, Default, Deserialize)]
pub struct OrderWebhookPayload {
    pub id: Option<PlatformId>,
    pub order_number: Option<PlatformId>,
    /// Display name such as "#1001"
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer: Option<Customer>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub current_total_price: Option<String>,
    pub total_price: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Customer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

impl Address {
    /// Non-empty components joined with ", ", in postal order
    fn formatted(&self) -> String {
        [
            &self.address1,
            &self.address2,
            &self.city,
            &self.province,
            &self.country,
            &self.zip,
        ]
        .into_iter()
        .filter_map(|component| non_blank(component.as_deref()))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Shopify may send `null` for either field, which must not fail the order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// Normalized order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEvent {
    /// Shopify order id, kept verbatim since it's echoed back in button ids
    pub id: String,
    pub order_number: Option<String>,
    /// First and last name joined and trimmed
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Shipping address, or billing address when there is no shipping one.
    /// Empty when neither is present.
    pub address: String,
    pub line_items: Vec<LineItem>,
    pub total_price: Option<String>,
}

impl TryFrom<OrderWebhookPayload> for OrderEvent {
    type Error = WebhookError;

    fn try_from(payload: OrderWebhookPayload) -> Result<Self, Self::Error> {
        let id = payload
            .id
            .as_ref()
            .map(PlatformId::to_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WebhookError::MalformedPayload("order id is missing".into()))?;

        let customer = payload.customer.as_ref();

        let customer_name = customer.and_then(|c| {
            let full_name = format!(
                "{} {}",
                c.first_name.as_deref().unwrap_or_default(),
                c.last_name.as_deref().unwrap_or_default()
            );
            non_blank(Some(full_name.as_str())).map(str::to_string)
        });

        let email = non_blank(payload.email.as_deref())
            .or_else(|| non_blank(customer.and_then(|c| c.email.as_deref())))
            .map(str::to_string);

        let phone = non_blank(payload.phone.as_deref())
            .or_else(|| non_blank(customer.and_then(|c| c.phone.as_deref())))
            .or_else(|| {
                non_blank(
                    payload
                        .shipping_address
                        .as_ref()
                        .and_then(|a| a.phone.as_deref()),
                )
            })
            .or_else(|| {
                non_blank(
                    payload
                        .billing_address
                        .as_ref()
                        .and_then(|a| a.phone.as_deref()),
                )
            })
            .map(str::to_string);

        let address = payload
            .shipping_address
            .as_ref()
            .or(payload.billing_address.as_ref())
            .map(Address::formatted)
            .unwrap_or_default();

        let order_number = payload
            .order_number
            .as_ref()
            .map(PlatformId::to_string)
            .filter(|n| !n.trim().is_empty())
            .or_else(|| non_blank(payload.name.as_deref()).map(str::to_string));

        let total_price = non_blank(payload.current_total_price.as_deref())
            .or_else(|| non_blank(payload.total_price.as_deref()))
            .map(str::to_string);

        Ok(OrderEvent {
            id,
            order_number,
            customer_name,
            email,
            phone,
            address,
            line_items: payload.line_items,
            total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> Result<OrderEvent, WebhookError> {
        let payload: OrderWebhookPayload = serde_json::from_value(value).unwrap();
        OrderEvent::try_from(payload)
    }

    #[test]
    fn test_numeric_id_is_kept_verbatim() {
        let order = parse(serde_json::json!({"id": 820982911946154500u64})).unwrap();
        assert_eq!(order.id, "820982911946154500");

        let order = parse(serde_json::json!({"id": "gid://shopify/Order/99"})).unwrap();
        assert_eq!(order.id, "gid://shopify/Order/99");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = parse(serde_json::json!({"order_number": "#1001"}));
        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn test_first_name_only() {
        let order = parse(serde_json::json!({
            "id": 1,
            "customer": {"first_name": "  Ana  "}
        }))
        .unwrap();
        assert_eq!(order.customer_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_full_name_and_blank_name() {
        let order = parse(serde_json::json!({
            "id": 1,
            "customer": {"first_name": "Ana", "last_name": "López"}
        }))
        .unwrap();
        assert_eq!(order.customer_name.as_deref(), Some("Ana López"));

        let order = parse(serde_json::json!({
            "id": 1,
            "customer": {"first_name": null, "last_name": " "}
        }))
        .unwrap();
        assert_eq!(order.customer_name, None);
    }

    #[test]
    fn test_phone_fallback_chain() {
        let order = parse(serde_json::json!({
            "id": 1,
            "shipping_address": {"phone": "+52 555 111"},
            "billing_address": {"phone": "+52 555 222"}
        }))
        .unwrap();
        assert_eq!(order.phone.as_deref(), Some("+52 555 111"));

        let order = parse(serde_json::json!({
            "id": 1,
            "billing_address": {"phone": "+52 555 222"}
        }))
        .unwrap();
        assert_eq!(order.phone.as_deref(), Some("+52 555 222"));

        let order = parse(serde_json::json!({
            "id": 1,
            "phone": "+52 555 000",
            "shipping_address": {"phone": "+52 555 111"}
        }))
        .unwrap();
        assert_eq!(order.phone.as_deref(), Some("+52 555 000"));

        let order = parse(serde_json::json!({"id": 1})).unwrap();
        assert_eq!(order.phone, None);
    }

    #[test]
    fn test_address_skips_missing_components() {
        let order = parse(serde_json::json!({
            "id": 1,
            "shipping_address": {
                "address1": "Av. Reforma 1",
                "address2": "",
                "city": "CDMX",
                "province": null,
                "country": "Mexico",
                "zip": "06600"
            },
            "billing_address": {"address1": "ignored"}
        }))
        .unwrap();
        assert_eq!(order.address, "Av. Reforma 1, CDMX, Mexico, 06600");
    }

    #[test]
    fn test_address_falls_back_to_billing() {
        let order = parse(serde_json::json!({
            "id": 1,
            "billing_address": {"address1": "Calle 2", "city": "Puebla"}
        }))
        .unwrap();
        assert_eq!(order.address, "Calle 2, Puebla");

        let order = parse(serde_json::json!({"id": 1})).unwrap();
        assert_eq!(order.address, "");
    }

    #[test]
    fn test_order_number_and_total_fallbacks() {
        let order = parse(serde_json::json!({
            "id": 1,
            "order_number": 1001,
            "total_price": "10.00"
        }))
        .unwrap();
        assert_eq!(order.order_number.as_deref(), Some("1001"));
        assert_eq!(order.total_price.as_deref(), Some("10.00"));

        let order = parse(serde_json::json!({
            "id": 1,
            "name": "#1002",
            "current_total_price": "8.50",
            "total_price": "10.00"
        }))
        .unwrap();
        assert_eq!(order.order_number.as_deref(), Some("#1002"));
        assert_eq!(order.total_price.as_deref(), Some("8.50"));
    }

    #[test]
    fn test_blank_order_number_falls_back_to_name() {
        let order = parse(serde_json::json!({
            "id": 1,
            "order_number": "",
            "name": "#1002"
        }))
        .unwrap();
        assert_eq!(order.order_number.as_deref(), Some("#1002"));

        let order = parse(serde_json::json!({"id": 1, "order_number": " ", "name": " "})).unwrap();
        assert_eq!(order.order_number, None);
    }

    #[test]
    fn test_null_line_item_fields_are_accepted() {
        let order = parse(serde_json::json!({
            "id": 1,
            "line_items": [{"title": null, "quantity": 1}, {"title": "Mug", "quantity": null}]
        }))
        .unwrap();
        assert_eq!(
            order.line_items,
            [
                LineItem {
                    title: None,
                    quantity: Some(1),
                },
                LineItem {
                    title: Some("Mug".into()),
                    quantity: None,
                },
            ]
        );
    }

    #[test]
    fn test_email_prefers_order_over_customer() {
        let order = parse(serde_json::json!({
            "id": 1,
            "customer": {"email": "customer@example.com"}
        }))
        .unwrap();
        assert_eq!(order.email.as_deref(), Some("customer@example.com"));

        let order = parse(serde_json::json!({
            "id": 1,
            "email": "order@example.com",
            "customer": {"email": "customer@example.com"}
        }))
        .unwrap();
        assert_eq!(order.email.as_deref(), Some("order@example.com"));
    }
}
