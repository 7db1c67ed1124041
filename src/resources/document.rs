//! Top-level response documents and listing pages.

use serde::Deserialize;
use serde_json::Value;

use super::{Account, Resource, Transaction, Webhook};
use crate::clients::ApiError;

/// Opaque cursor to the next (or previous) page of a listing.
///
/// The cursor is the absolute URL the server returned in `links.next`; the
/// client requests it verbatim and never rebuilds its query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wraps a server-issued page URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the page URL.
    #[must_use]
    pub fn as_url(&self) -> &str {
        &self.0
    }
}

/// Top-level `links` member of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentLinks {
    /// URL of the previous page, if any.
    #[serde(default)]
    pub prev: Option<String>,
    /// URL of the next page, if any. `None` ends a listing.
    #[serde(default)]
    pub next: Option<String>,
}

/// The `data` member of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryData {
    /// A single resource.
    One(Resource),
    /// An ordered list of resources.
    Many(Vec<Resource>),
}

/// A decoded response document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The primary data.
    pub data: PrimaryData,
    /// Pagination links.
    pub links: DocumentLinks,
}

impl Document {
    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the body is not JSON, `data` is
    /// neither an object nor an array, or any resource fails to decode.
    /// Resources of unrecognised types decode as
    /// [`Resource::Raw`](super::Resource::Raw).
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ApiError::parse_with("response body is not valid JSON", e))?;
        Self::from_value(value)
    }

    /// Decodes an already-parsed response document.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut object) = value else {
            return Err(ApiError::parse("response document must be a JSON object"));
        };

        let links = match object.remove("links") {
            None | Some(Value::Null) => DocumentLinks::default(),
            Some(links) => serde_json::from_value(links)
                .map_err(|e| ApiError::parse_with("invalid document `links`", e))?,
        };

        let data = match object.remove("data") {
            Some(Value::Array(items)) => PrimaryData::Many(
                items
                    .into_iter()
                    .map(Resource::from_value)
                    .collect::<Result<_, _>>()?,
            ),
            Some(item @ Value::Object(_)) => PrimaryData::One(Resource::from_value(item)?),
            Some(_) | None => {
                return Err(ApiError::parse(
                    "document `data` must be a resource object or an array of them",
                ))
            }
        };

        Ok(Self { data, links })
    }

    /// Returns the single resource of a document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if `data` is an array.
    pub fn into_single(self) -> Result<Resource, ApiError> {
        match self.data {
            PrimaryData::One(resource) => Ok(resource),
            PrimaryData::Many(_) => Err(ApiError::parse(
                "expected a single resource but `data` is an array",
            )),
        }
    }

    /// Converts a listing document into a [`Page`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if `data` is a single object.
    pub fn into_page(self) -> Result<Page, ApiError> {
        match self.data {
            PrimaryData::Many(items) => Ok(Page::new(
                items,
                cursor(self.links.next),
                cursor(self.links.prev),
            )),
            PrimaryData::One(_) => Err(ApiError::parse(
                "expected a list of resources but `data` is an object",
            )),
        }
    }
}

fn cursor(link: Option<String>) -> Option<PageCursor> {
    link.filter(|url| !url.is_empty()).map(PageCursor::new)
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    items: Vec<Resource>,
    next: Option<PageCursor>,
    prev: Option<PageCursor>,
}

impl Page {
    /// Creates a page.
    #[must_use]
    pub const fn new(
        items: Vec<Resource>,
        next: Option<PageCursor>,
        prev: Option<PageCursor>,
    ) -> Self {
        Self { items, next, prev }
    }

    /// Returns the resources on this page, in server order.
    #[must_use]
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    /// Consumes the page and returns its resources.
    #[must_use]
    pub fn into_items(self) -> Vec<Resource> {
        self.items
    }

    /// Returns the cursor of the next page, if any.
    #[must_use]
    pub const fn next_cursor(&self) -> Option<&PageCursor> {
        self.next.as_ref()
    }

    /// Returns the cursor of the previous page, if any.
    #[must_use]
    pub const fn prev_cursor(&self) -> Option<&PageCursor> {
        self.prev.as_ref()
    }

    /// Returns `true` if another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the number of resources on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the accounts on this page.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.items.iter().filter_map(Resource::as_account)
    }

    /// Iterates over the transactions on this page.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.items.iter().filter_map(Resource::as_transaction)
    }

    /// Iterates over the webhooks on this page.
    pub fn webhooks(&self) -> impl Iterator<Item = &Webhook> {
        self.items.iter().filter_map(Resource::as_webhook)
    }

    /// Iterates over the resources of unrecognised types on this page.
    pub fn raw_resources(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter().filter(|r| r.is_raw())
    }
}

impl IntoIterator for Page {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Response of the `/util/ping` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    /// Unique id of the authenticated request.
    pub id: String,
    /// A cute emoji that represents the response status.
    pub status_emoji: String,
}

impl PingResponse {
    /// Decodes a ping response body (`{"meta": {...}}`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the body does not have that shape.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            meta: PingResponse,
        }

        serde_json::from_str::<Envelope>(body)
            .map(|envelope| envelope.meta)
            .map_err(|e| ApiError::parse_with("invalid ping response", e))
    }
}
