//! Typed resource model and the resource parser.
//!
//! Every entity the API returns shares one envelope shape:
//!
//! ```json
//! { "type": "accounts", "id": "...", "attributes": { ... }, "relationships": { ... } }
//! ```
//!
//! [`Resource::from_value`] dispatches on `type` into a closed set of typed
//! variants. A `type` this crate does not know becomes [`Resource::Raw`],
//! carrying the untouched JSON, so a single unrecognised item never aborts
//! the rest of a page. Attribute fields that a typed variant does not model
//! are kept in that variant's `extra` map.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use up_api::resources::{Resource, ResourceType};
//!
//! let resource = Resource::from_value(json!({
//!     "type": "categories",
//!     "id": "takeaway",
//!     "attributes": {"name": "Takeaway"}
//! }))
//! .unwrap();
//!
//! assert_eq!(resource.resource_type(), Some(ResourceType::Categories));
//! let category = resource.into_category().unwrap();
//! assert_eq!(category.attributes.name, "Takeaway");
//! ```

mod account;
mod category;
mod document;
mod money;
mod relationship;
mod webhook;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::ApiError;

pub use account::{Account, AccountAttributes, AccountType, OwnershipType};
pub use category::{Category, CategoryAttributes, Tag, TagAttributes, Transaction};
pub use document::{Document, DocumentLinks, Page, PageCursor, PingResponse, PrimaryData};
pub use money::{minor_unit_exponent, MoneyError, MoneyObject};
pub use relationship::{Relationship, RelationshipData, Relationships, ResourceIdentifier};
pub use webhook::{Webhook, WebhookAttributes, WebhookDeliveryLog, WebhookEvent};

/// The closed set of resource types this crate decodes into typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    /// `accounts`
    Accounts,
    /// `categories`
    Categories,
    /// `transactions`
    Transactions,
    /// `tags`
    Tags,
    /// `webhooks`
    Webhooks,
    /// `webhook-events`
    WebhookEvents,
    /// `webhook-delivery-logs`
    WebhookDeliveryLogs,
}

impl ResourceType {
    /// Every known resource type.
    pub const ALL: [Self; 7] = [
        Self::Accounts,
        Self::Categories,
        Self::Transactions,
        Self::Tags,
        Self::Webhooks,
        Self::WebhookEvents,
        Self::WebhookDeliveryLogs,
    ];

    /// Returns the wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Categories => "categories",
            Self::Transactions => "transactions",
            Self::Tags => "tags",
            Self::Webhooks => "webhooks",
            Self::WebhookEvents => "webhook-events",
            Self::WebhookDeliveryLogs => "webhook-delivery-logs",
        }
    }

    /// Looks up a type by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Links attached to a resource object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceLinks {
    /// Canonical URL of the resource.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// A parsed resource with attributes of type `A`.
///
/// Resource objects are immutable snapshots of the server state at the time
/// they were fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceObject<A> {
    /// The unique identifier of the resource.
    pub id: String,
    /// The variant-specific attributes.
    pub attributes: A,
    /// References to other resources.
    #[serde(default)]
    pub relationships: Relationships,
    /// Links to this resource.
    #[serde(default)]
    pub links: Option<ResourceLinks>,
}

/// Attributes of a resource whose schema is not modelled by this crate.
///
/// Every field the server sent is available by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueAttributes(Map<String, Value>);

impl OpaqueAttributes {
    /// Returns the attribute with the given wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the wrapper and returns the attribute map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// A resource of a type this crate does not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResource {
    /// The `type` discriminator as sent.
    pub resource_type: String,
    /// The `id` as sent.
    pub id: String,
    /// The complete, untouched resource object.
    pub value: Value,
}

/// One resource of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// An `accounts` resource.
    Account(Account),
    /// A `categories` resource.
    Category(Category),
    /// A `tags` resource.
    Tag(Tag),
    /// A `transactions` resource.
    Transaction(Transaction),
    /// A `webhooks` resource.
    Webhook(Webhook),
    /// A `webhook-events` resource.
    WebhookEvent(WebhookEvent),
    /// A `webhook-delivery-logs` resource.
    WebhookDeliveryLog(WebhookDeliveryLog),
    /// A resource of an unrecognised type, kept verbatim.
    Raw(RawResource),
}

macro_rules! typed_accessors {
    ($($variant:ident => $kind:ident, $ty:ty, $as_fn:ident, $into_fn:ident;)*) => {
        $(
            #[doc = concat!("Returns the resource as a [`", stringify!($ty), "`], if it is one.")]
            #[must_use]
            pub const fn $as_fn(&self) -> Option<&$ty> {
                match self {
                    Self::$variant(resource) => Some(resource),
                    _ => None,
                }
            }

            #[doc = concat!("Converts the resource into a [`", stringify!($ty), "`].")]
            ///
            /// # Errors
            ///
            /// Returns [`ApiError::UnexpectedResourceType`] for a different
            /// known type and [`ApiError::UnrecognizedResourceType`] for a raw
            /// resource.
            pub fn $into_fn(self) -> Result<$ty, ApiError> {
                match self {
                    Self::$variant(resource) => Ok(resource),
                    other => Err(other.mismatch(ResourceType::$kind)),
                }
            }
        )*
    };
}

impl Resource {
    /// Decodes one resource object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the value is not an object with string
    /// `type` and `id` members, or if a known type's attributes do not match
    /// its schema (including a failed money integrity check). An unknown
    /// `type` is not an error.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut object) = value else {
            return Err(ApiError::parse("resource must be a JSON object"));
        };

        let resource_type = object
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::parse("resource is missing a string `type`"))?;
        let id = object
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                ApiError::parse(format!("{resource_type} resource is missing a string `id`"))
            })?;

        let Some(kind) = ResourceType::from_name(&resource_type) else {
            tracing::warn!(
                resource_type = %resource_type,
                id = %id,
                "Unrecognized resource type, keeping raw resource"
            );
            return Ok(Self::Raw(RawResource {
                resource_type,
                id,
                value: Value::Object(object),
            }));
        };

        if matches!(object.get("attributes"), None | Some(Value::Null)) {
            object.insert("attributes".to_string(), Value::Object(Map::new()));
        }
        let value = Value::Object(object);

        Ok(match kind {
            ResourceType::Accounts => Self::Account(decode(value, kind, &id)?),
            ResourceType::Categories => Self::Category(decode(value, kind, &id)?),
            ResourceType::Transactions => Self::Transaction(decode(value, kind, &id)?),
            ResourceType::Tags => Self::Tag(decode(value, kind, &id)?),
            ResourceType::Webhooks => Self::Webhook(decode(value, kind, &id)?),
            ResourceType::WebhookEvents => Self::WebhookEvent(decode(value, kind, &id)?),
            ResourceType::WebhookDeliveryLogs => {
                Self::WebhookDeliveryLog(decode(value, kind, &id)?)
            }
        })
    }

    /// Returns the known resource type, or `None` for [`Resource::Raw`].
    #[must_use]
    pub const fn resource_type(&self) -> Option<ResourceType> {
        match self {
            Self::Account(_) => Some(ResourceType::Accounts),
            Self::Category(_) => Some(ResourceType::Categories),
            Self::Tag(_) => Some(ResourceType::Tags),
            Self::Transaction(_) => Some(ResourceType::Transactions),
            Self::Webhook(_) => Some(ResourceType::Webhooks),
            Self::WebhookEvent(_) => Some(ResourceType::WebhookEvents),
            Self::WebhookDeliveryLog(_) => Some(ResourceType::WebhookDeliveryLogs),
            Self::Raw(_) => None,
        }
    }

    /// Returns the `type` discriminator as sent by the server.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Raw(raw) => &raw.resource_type,
            _ => self.resource_type().map_or("", ResourceType::as_str),
        }
    }

    /// Returns the resource id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Account(r) => &r.id,
            Self::Category(r) => &r.id,
            Self::Tag(r) => &r.id,
            Self::Transaction(r) | Self::WebhookEvent(r) | Self::WebhookDeliveryLog(r) => &r.id,
            Self::Webhook(r) => &r.id,
            Self::Raw(r) => &r.id,
        }
    }

    /// Returns a reference to this resource.
    #[must_use]
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.type_name(), self.id())
    }

    /// Returns the parsed relationships, or `None` for a raw resource.
    #[must_use]
    pub const fn relationships(&self) -> Option<&Relationships> {
        match self {
            Self::Account(r) => Some(&r.relationships),
            Self::Category(r) => Some(&r.relationships),
            Self::Tag(r) => Some(&r.relationships),
            Self::Transaction(r) | Self::WebhookEvent(r) | Self::WebhookDeliveryLog(r) => {
                Some(&r.relationships)
            }
            Self::Webhook(r) => Some(&r.relationships),
            Self::Raw(_) => None,
        }
    }

    /// Returns `true` if this is a [`Resource::Raw`] fallback.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    typed_accessors! {
        Account => Accounts, Account, as_account, into_account;
        Category => Categories, Category, as_category, into_category;
        Tag => Tags, Tag, as_tag, into_tag;
        Transaction => Transactions, Transaction, as_transaction, into_transaction;
        Webhook => Webhooks, Webhook, as_webhook, into_webhook;
        WebhookEvent => WebhookEvents, WebhookEvent, as_webhook_event, into_webhook_event;
        WebhookDeliveryLog => WebhookDeliveryLogs, WebhookDeliveryLog, as_webhook_delivery_log, into_webhook_delivery_log;
    }

    fn mismatch(self, expected: ResourceType) -> ApiError {
        match self.resource_type() {
            Some(found) => ApiError::UnexpectedResourceType {
                expected,
                found,
                id: self.id().to_string(),
            },
            None => ApiError::UnrecognizedResourceType {
                resource_type: self.type_name().to_string(),
                id: self.id().to_string(),
            },
        }
    }
}

fn decode<A: DeserializeOwned>(
    value: Value,
    kind: ResourceType,
    id: &str,
) -> Result<ResourceObject<A>, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse {
        context: format!("invalid {kind} resource '{id}': {e}"),
        source: Some(e),
    })
}
