//! Identifiers for products and watchlist owners.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PricewatchError;

/// Opaque product identifier (an ASIN on Amazon marketplaces).
///
/// Identifiers are trimmed and upper-cased on construction so that `b0c1` and
/// `B0C1 ` key the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Validate and normalize a product identifier.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidArg` if the identifier is empty or
    /// contains anything other than ASCII letters and digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PricewatchError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PricewatchError::InvalidArg(
                "product id must not be empty".into(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PricewatchError::InvalidArg(format!(
                "product id must be alphanumeric: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductId {
    type Err = PricewatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = PricewatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Identifier of the user owning a watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Build an owner id.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidArg` for blank identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, PricewatchError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PricewatchError::InvalidArg(
                "owner id must not be empty".into(),
            ));
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = PricewatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(id: OwnerId) -> Self {
        id.0
    }
}
