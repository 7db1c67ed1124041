//! Money amounts with integrity checking.
//!
//! The API reports every amount twice: as a decimal string (`value`) and as
//! an integer in the currency's minor unit (`valueInBaseUnits`). A
//! [`MoneyObject`] can only be constructed when both agree, so a mismatch
//! surfaces as a parse fault instead of being silently corrected.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currencies with no minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

/// Currencies with three minor digits.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Currencies with four minor digits.
const FOUR_DECIMAL_CURRENCIES: &[&str] = &["CLF", "UYW"];

/// Errors raised when a money amount fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The currency code is not three uppercase ASCII letters.
    #[error("Invalid ISO 4217 currency code '{code}'")]
    InvalidCurrencyCode {
        /// The rejected code.
        code: String,
    },

    /// The decimal value could not be parsed or scaled.
    #[error("Invalid money value '{value}' for currency {currency_code}")]
    InvalidValue {
        /// The currency of the amount.
        currency_code: String,
        /// The rejected value.
        value: String,
    },

    /// `valueInBaseUnits` disagrees with `value` scaled by the currency exponent.
    #[error("Money integrity fault: {value} {currency_code} is {expected} base units, but valueInBaseUnits was {value_in_base_units}")]
    BaseUnitsMismatch {
        /// The currency of the amount.
        currency_code: String,
        /// The decimal value as reported.
        value: String,
        /// The base-unit value as reported.
        value_in_base_units: i64,
        /// What `value` scales to in base units.
        expected: String,
    },
}

/// Returns the number of minor-unit digits for an ISO 4217 currency code.
///
/// Codes not in the exception tables use two digits.
///
/// # Example
///
/// ```rust
/// use up_api::resources::minor_unit_exponent;
///
/// assert_eq!(minor_unit_exponent("AUD"), 2);
/// assert_eq!(minor_unit_exponent("JPY"), 0);
/// assert_eq!(minor_unit_exponent("KWD"), 3);
/// ```
#[must_use]
pub fn minor_unit_exponent(currency_code: &str) -> u32 {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency_code) {
        0
    } else if THREE_DECIMAL_CURRENCIES.contains(&currency_code) {
        3
    } else if FOUR_DECIMAL_CURRENCIES.contains(&currency_code) {
        4
    } else {
        2
    }
}

/// A validated money amount.
///
/// # Example
///
/// ```rust
/// use up_api::resources::MoneyObject;
///
/// let amount = MoneyObject::new("AUD", "10.00", 1000).unwrap();
/// assert_eq!(amount.value_in_base_units(), 1000);
///
/// assert!(MoneyObject::new("AUD", "10.00", 999).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MoneyWire")]
pub struct MoneyObject {
    currency_code: String,
    value: String,
    value_in_base_units: i64,
}

/// Unvalidated wire shape of a money amount.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyWire {
    currency_code: String,
    value: String,
    value_in_base_units: i64,
}

impl TryFrom<MoneyWire> for MoneyObject {
    type Error = MoneyError;

    fn try_from(wire: MoneyWire) -> Result<Self, Self::Error> {
        Self::new(wire.currency_code, wire.value, wire.value_in_base_units)
    }
}

impl MoneyObject {
    /// Creates a money amount, checking that `value` and
    /// `value_in_base_units` describe the same quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the currency code is malformed, `value` is
    /// not a decimal number, or the base-unit check fails.
    pub fn new(
        currency_code: impl Into<String>,
        value: impl Into<String>,
        value_in_base_units: i64,
    ) -> Result<Self, MoneyError> {
        let currency_code = currency_code.into();
        let value = value.into();

        if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrencyCode {
                code: currency_code,
            });
        }

        let invalid_value = || MoneyError::InvalidValue {
            currency_code: currency_code.clone(),
            value: value.clone(),
        };

        let decimal = Decimal::from_str(value.trim()).map_err(|_| invalid_value())?;
        let scale = 10_i64.pow(minor_unit_exponent(&currency_code));
        let scaled = decimal
            .checked_mul(Decimal::from(scale))
            .ok_or_else(invalid_value)?;

        if scaled != Decimal::from(value_in_base_units) {
            return Err(MoneyError::BaseUnitsMismatch {
                expected: scaled.normalize().to_string(),
                currency_code,
                value,
                value_in_base_units,
            });
        }

        Ok(Self {
            currency_code,
            value,
            value_in_base_units,
        })
    }

    /// Returns the ISO 4217 currency code.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Returns the decimal value exactly as reported by the API.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the amount in the currency's minor unit.
    #[must_use]
    pub const fn value_in_base_units(&self) -> i64 {
        self.value_in_base_units
    }

    /// Returns the decimal value as a [`Decimal`].
    #[must_use]
    pub fn decimal(&self) -> Decimal {
        Decimal::new(
            self.value_in_base_units,
            minor_unit_exponent(&self.currency_code),
        )
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.value_in_base_units < 0
    }
}

impl fmt::Display for MoneyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency_code)
    }
}
