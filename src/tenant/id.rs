//! Tenant identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum length of a DNS label.
const MAX_SLUG_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantIdError {
    #[error("tenant slug is empty")]
    Empty,
    #[error("tenant slug '{0}' is longer than 63 characters")]
    TooLong(String),
    #[error("tenant slug '{0}' may only contain a-z, 0-9 and '-'")]
    InvalidCharacter(String),
    #[error("tenant slug '{0}' must not start or end with '-'")]
    EdgeHyphen(String),
}

/// A tenant slug. Always lowercase and usable as a DNS label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, TenantIdError> {
        let slug = raw.trim().to_ascii_lowercase();

        if slug.is_empty() {
            return Err(TenantIdError::Empty);
        }
        if slug.len() > MAX_SLUG_LEN {
            return Err(TenantIdError::TooLong(slug));
        }
        if !slug.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-') {
            return Err(TenantIdError::InvalidCharacter(slug));
        }
        if slug.starts_with('-') || slug.ends_with('-') {
            return Err(TenantIdError::EdgeHyphen(slug));
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TenantId {
    type Err = TenantIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TenantId {
    type Error = TenantIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
