//! Account resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use up_api::{AccountListParams, AccountType, UpClient};
//!
//! let params = AccountListParams {
//!     account_type: Some(AccountType::Saver),
//!     ..Default::default()
//! };
//! let mut pages = client.list_accounts(params);
//! while let Some(page) = pages.next_page().await {
//!     for account in page?.accounts() {
//!         println!("{}: {}", account.attributes.display_name, account.attributes.balance);
//!     }
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::money::MoneyObject;
use super::ResourceObject;

/// An Up bank account.
pub type Account = ResourceObject<AccountAttributes>;

/// The bank account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// A savings account.
    Saver,
    /// An everyday spending account.
    Transactional,
    /// A home loan account.
    HomeLoan,
}

impl AccountType {
    /// Returns the value used on the wire and in `filter[accountType]`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saver => "SAVER",
            Self::Transactional => "TRANSACTIONAL",
            Self::HomeLoan => "HOME_LOAN",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ownership structure of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    /// Owned by one person.
    Individual,
    /// Shared between two people.
    Joint,
}

impl OwnershipType {
    /// Returns the value used on the wire and in `filter[ownershipType]`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Joint => "JOINT",
        }
    }
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of an [`Account`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    /// The name associated with the account in the Up app.
    pub display_name: String,
    /// The bank account type.
    pub account_type: AccountType,
    /// The ownership structure.
    pub ownership_type: OwnershipType,
    /// The available balance.
    pub balance: MoneyObject,
    /// When the account was first opened.
    pub created_at: DateTime<Utc>,
    /// Attributes this crate does not model yet.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
