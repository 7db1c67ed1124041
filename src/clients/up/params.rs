//! Query parameters for listing operations.
//!
//! Each parameter struct turns into an ordered list of query pairs. A filter
//! that is `None` is omitted entirely, never sent empty.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::PageSize;
use crate::resources::{AccountType, OwnershipType};

/// Parameters for listing accounts.
///
/// # Example
///
/// ```rust
/// use up_api::{AccountListParams, AccountType, OwnershipType, PageSize};
///
/// let params = AccountListParams {
///     account_type: Some(AccountType::Transactional),
///     ownership_type: Some(OwnershipType::Joint),
///     ..Default::default()
/// };
///
/// let pairs = params.query_pairs(PageSize::default());
/// assert_eq!(pairs[0], ("page[size]".to_string(), "20".to_string()));
/// assert_eq!(pairs.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountListParams {
    /// Only return accounts of this type.
    pub account_type: Option<AccountType>,
    /// Only return accounts with this ownership.
    pub ownership_type: Option<OwnershipType>,
    /// Page size override; the client default is used when `None`.
    pub page_size: Option<PageSize>,
}

impl AccountListParams {
    /// Returns the query pairs for this listing.
    #[must_use]
    pub fn query_pairs(&self, default_page_size: PageSize) -> Vec<(String, String)> {
        let mut pairs = vec![page_size_pair(self.page_size, default_page_size)];
        if let Some(account_type) = self.account_type {
            pairs.push(pair("filter[accountType]", account_type.as_str()));
        }
        if let Some(ownership_type) = self.ownership_type {
            pairs.push(pair("filter[ownershipType]", ownership_type.as_str()));
        }
        pairs
    }
}

/// Settlement status of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Pending; not yet settled.
    Held,
    /// Settled.
    Settled,
}

impl TransactionStatus {
    /// Returns the wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Held => "HELD",
            Self::Settled => "SETTLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for listing transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionListParams {
    /// Only return transactions with this status.
    pub status: Option<TransactionStatus>,
    /// Only return transactions created at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Only return transactions created before this time.
    pub until: Option<DateTime<Utc>>,
    /// Only return transactions in this category (by category id).
    pub category: Option<String>,
    /// Only return transactions carrying this tag.
    pub tag: Option<String>,
    /// Page size override; the client default is used when `None`.
    pub page_size: Option<PageSize>,
}

impl TransactionListParams {
    /// Returns the query pairs for this listing.
    #[must_use]
    pub fn query_pairs(&self, default_page_size: PageSize) -> Vec<(String, String)> {
        let mut pairs = vec![page_size_pair(self.page_size, default_page_size)];
        if let Some(status) = self.status {
            pairs.push(pair("filter[status]", status.as_str()));
        }
        if let Some(since) = self.since {
            pairs.push(pair("filter[since]", &timestamp(since)));
        }
        if let Some(until) = self.until {
            pairs.push(pair("filter[until]", &timestamp(until)));
        }
        if let Some(category) = &self.category {
            pairs.push(pair("filter[category]", category));
        }
        if let Some(tag) = &self.tag {
            pairs.push(pair("filter[tag]", tag));
        }
        pairs
    }
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn page_size_pair(size: Option<PageSize>, default: PageSize) -> (String, String) {
    pair("page[size]", &size.unwrap_or(default).to_string())
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Returns the `page[size]` pair alone, for listings without filters.
pub(crate) fn page_only(size: Option<PageSize>, default: PageSize) -> Vec<(String, String)> {
    vec![page_size_pair(size, default)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_account_params_default_sends_only_page_size() {
        let pairs = AccountListParams::default().query_pairs(PageSize::default());
        assert_eq!(pairs, vec![pair("page[size]", "20")]);
    }

    #[test]
    fn test_account_params_with_filters() {
        let params = AccountListParams {
            account_type: Some(AccountType::Saver),
            ownership_type: Some(OwnershipType::Individual),
            page_size: Some(PageSize::new(5).unwrap()),
        };
        assert_eq!(
            params.query_pairs(PageSize::default()),
            vec![
                pair("page[size]", "5"),
                pair("filter[accountType]", "SAVER"),
                pair("filter[ownershipType]", "INDIVIDUAL"),
            ]
        );
    }

    #[test]
    fn test_transaction_params() {
        let params = TransactionListParams {
            status: Some(TransactionStatus::Settled),
            since: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            until: None,
            category: Some("good-life".to_string()),
            tag: None,
            page_size: None,
        };
        assert_eq!(
            params.query_pairs(PageSize::new(100).unwrap()),
            vec![
                pair("page[size]", "100"),
                pair("filter[status]", "SETTLED"),
                pair("filter[since]", "2024-01-01T00:00:00Z"),
                pair("filter[category]", "good-life"),
            ]
        );
    }

    #[test]
    fn test_transaction_status_names() {
        assert_eq!(TransactionStatus::Held.to_string(), "HELD");
        assert_eq!(TransactionStatus::Settled.as_str(), "SETTLED");
    }
}
