//! Webhook resources.
//!
//! Webhooks are configured on the Up side and deliver events to a URL owned
//! by the caller. This crate only reads webhook configuration and delivery
//! logs; it does not receive deliveries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{OpaqueAttributes, ResourceObject};

/// A webhook subscription.
pub type Webhook = ResourceObject<WebhookAttributes>;

/// An event delivered (or about to be delivered) to a webhook.
///
/// The attribute schema is not modelled yet; see [`OpaqueAttributes`].
pub type WebhookEvent = ResourceObject<OpaqueAttributes>;

/// A record of one delivery attempt to a webhook.
///
/// The attribute schema is not modelled yet; see [`OpaqueAttributes`].
pub type WebhookDeliveryLog = ResourceObject<OpaqueAttributes>;

/// Attributes of a [`Webhook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAttributes {
    /// The URL events are delivered to.
    pub url: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// The shared secret used to sign deliveries. Only returned when the
    /// webhook is first created.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// When the webhook was created.
    pub created_at: DateTime<Utc>,
    /// Attributes this crate does not model yet.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
