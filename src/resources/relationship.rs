//! Resource identifiers and relationships.
//!
//! Relationships are references, never ownership: a transaction's `account`
//! relationship names an account by identifier and carries an optional
//! `related` link the caller may fetch with
//! [`UpClient::fetch_related`](crate::UpClient::fetch_related). Parsing never
//! triggers a secondary request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ResourceType;

/// Minimal reference to any resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type discriminator as sent by the API.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The unique identifier of the resource.
    pub id: String,
}

impl ResourceIdentifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns the known resource type, or `None` for a type this crate
    /// does not recognise.
    #[must_use]
    pub fn kind(&self) -> Option<ResourceType> {
        ResourceType::from_name(&self.resource_type)
    }
}

/// The `data` member of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RelationshipData {
    /// No linkage was included, or the to-one linkage was `null`.
    #[default]
    Empty,
    /// A to-one relationship.
    One(ResourceIdentifier),
    /// A to-many relationship, in server order.
    Many(Vec<ResourceIdentifier>),
}

impl RelationshipData {
    /// Returns all referenced identifiers, in order.
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            Self::Empty => &[],
            Self::One(identifier) => std::slice::from_ref(identifier),
            Self::Many(identifiers) => identifiers,
        }
    }
}

/// A single named relationship of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RelationshipWire")]
pub struct Relationship {
    /// The referenced resource(s).
    pub data: RelationshipData,
    /// URL of the related resource(s), for lazy fetching.
    pub related: Option<String>,
}

impl Relationship {
    /// Returns the single referenced identifier of a to-one relationship.
    #[must_use]
    pub const fn one(&self) -> Option<&ResourceIdentifier> {
        match &self.data {
            RelationshipData::One(identifier) => Some(identifier),
            RelationshipData::Empty | RelationshipData::Many(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkageWire {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

#[derive(Deserialize, Default)]
struct RelationshipLinksWire {
    #[serde(default)]
    related: Option<String>,
}

#[derive(Deserialize)]
struct RelationshipWire {
    #[serde(default)]
    data: Option<LinkageWire>,
    #[serde(default)]
    links: Option<RelationshipLinksWire>,
}

impl From<RelationshipWire> for Relationship {
    fn from(wire: RelationshipWire) -> Self {
        let data = match wire.data {
            None => RelationshipData::Empty,
            Some(LinkageWire::One(identifier)) => RelationshipData::One(identifier),
            Some(LinkageWire::Many(identifiers)) => RelationshipData::Many(identifiers),
        };
        Self {
            data,
            related: wire.links.and_then(|links| links.related),
        }
    }
}

/// Relationship name to relationship map of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Relationships(BTreeMap<String, Relationship>);

impl Relationships {
    /// Returns the relationship with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Relationship> {
        self.0.get(name)
    }

    /// Returns the related-resource URL of the named relationship.
    #[must_use]
    pub fn related_link(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|r| r.related.as_deref())
    }

    /// Iterates over relationships in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.0.iter().map(|(name, rel)| (name.as_str(), rel))
    }

    /// Returns the number of relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
