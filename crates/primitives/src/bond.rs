//! Bond identifier types.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Date;

/// CUSIP identifier of a bond issue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub struct Cusip(pub String);

impl Cusip {
    /// Create a new CUSIP.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the CUSIP as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cusip {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Cusip {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Composite join key of one bond observation: `<cusip>_<YYYYMMDD>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BondDateKey {
    /// Bond identifier.
    pub cusip: Cusip,
    /// Observation date.
    pub date: Date,
}

impl BondDateKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(cusip: Cusip, date: Date) -> Self {
        Self { cusip, date }
    }
}

impl std::fmt::Display for BondDateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.cusip, self.date.format("%Y%m%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cusip_from_str() {
        let cusip: Cusip = "00077TAA2".into();
        assert_eq!(cusip.as_str(), "00077TAA2");
    }

    #[test]
    fn key_formats_compact_date() {
        let date = Date::from_ymd_opt(2004, 7, 31).unwrap();
        let key = BondDateKey::new(Cusip::new("00077TAA2"), date);
        assert_eq!(key.to_string(), "00077TAA2_20040731");
    }
}
