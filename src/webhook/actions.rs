//! # Order Actions
//!
//! Actions offered as quick-reply buttons on every order notification.
//!
//! A WhatsApp button carries a single opaque string, so the `(action, order)`
//! pair travels encoded as `"<ACTION_KIND>|<order id>"`. [`ActionPayload`] is the
//! only place that string is built or taken apart.

use derive_more::{Display, Error};
use serde::Serialize;
use std::{fmt, str::FromStr};

const SEPARATOR: char = '|';

/// Fulfillment lifecycle operations that can be triggered from WhatsApp.
///
/// Declaration order is the order buttons are appended to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    FulfillOrder,
    CancelFulfillment,
    CancelOrder,
    ReadyForPickup,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::FulfillOrder,
        ActionKind::CancelFulfillment,
        ActionKind::CancelOrder,
        ActionKind::ReadyForPickup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::FulfillOrder => "FULFILL_ORDER",
            ActionKind::CancelFulfillment => "CANCEL_FULFILLMENT",
            ActionKind::CancelOrder => "CANCEL_ORDER",
            ActionKind::ReadyForPickup => "READY_FOR_PICKUP",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Display, PartialEq, Eq, Error)]
pub enum ActionPayloadError {
    #[display("button id has no '|' separator or no order id")]
    MissingOrderId,
    #[display("unknown action kind: {_0}")]
    UnknownKind(#[error(not(source))] String),
}

impl FromStr for ActionKind {
    type Err = ActionPayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ActionPayloadError::UnknownKind(s.to_string()))
    }
}

/// Button identifier carrying an action and the order it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPayload {
    pub kind: ActionKind,
    /// Platform order id, echoed back verbatim.
    pub order_id: String,
}

impl ActionPayload {
    pub fn new(kind: ActionKind, order_id: impl Into<String>) -> Self {
        Self {
            kind,
            order_id: order_id.into(),
        }
    }

    /// Encodes the payload as a button id.
    pub fn encode(&self) -> String {
        format!("{}{SEPARATOR}{}", self.kind, self.order_id)
    }

    /// Splits a raw button id into `(kind, order id)` without validating the kind.
    ///
    /// Everything after the first separator is the order id.
    pub fn split(raw: &str) -> Result<(&str, &str), ActionPayloadError> {
        match raw.split_once(SEPARATOR) {
            Some((kind, order_id)) if !order_id.is_empty() => Ok((kind, order_id)),
            _ => Err(ActionPayloadError::MissingOrderId),
        }
    }
}
