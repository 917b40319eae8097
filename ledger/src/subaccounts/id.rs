//! # Sub-Account Identifiers
//!
//! A sub-account is addressed by an owner address plus a small account
//! number, so one owner can keep several isolated balance buckets. The
//! canonical string form is `owner#number` — the `#` separator never
//! appears in the number part, so parsing is unambiguous even for owner
//! addresses that contain punctuation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when parsing a sub-account id from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSubaccountIdError {
    /// The string has no `#` separator between owner and number.
    #[error("missing '#' separator in sub-account id")]
    MissingSeparator,

    /// The owner part is empty.
    #[error("sub-account owner must not be empty")]
    EmptyOwner,

    /// The number part is not a valid u32.
    #[error("invalid sub-account number: {0}")]
    InvalidNumber(String),
}

// ---------------------------------------------------------------------------
// SubaccountId
// ---------------------------------------------------------------------------

/// Identifies one sub-ledger account: an owner address plus an account
/// number under that owner.
///
/// Equality is exact on both fields. The id carries no balance state —
/// it is a pure key into the sub-ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubaccountId {
    /// Owner address this account belongs to.
    pub owner: String,

    /// Account number under the owner. Most owners only ever use 0.
    pub number: u32,
}

impl SubaccountId {
    /// Creates a new sub-account id.
    pub fn new(owner: impl Into<String>, number: u32) -> Self {
        Self {
            owner: owner.into(),
            number,
        }
    }
}

impl fmt::Display for SubaccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.number)
    }
}

impl FromStr for SubaccountId {
    type Err = ParseSubaccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, number) = s
            .rsplit_once('#')
            .ok_or(ParseSubaccountIdError::MissingSeparator)?;
        if owner.is_empty() {
            return Err(ParseSubaccountIdError::EmptyOwner);
        }
        let number = number
            .parse::<u32>()
            .map_err(|_| ParseSubaccountIdError::InvalidNumber(number.to_string()))?;
        Ok(Self::new(owner, number))
    }
}

// ---------------------------------------------------------------------------
// Serde helper: serialize HashMap<SubaccountId, V> with string keys
// ---------------------------------------------------------------------------

/// Serde helper module for serializing/deserializing `HashMap<SubaccountId, V>`
/// as a JSON object keyed by the canonical `owner#number` string.
///
/// JSON requires map keys to be strings, but `SubaccountId` is a struct,
/// which serde refuses to use as a key. This module converts keys to/from
/// the canonical string form.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct MyStruct {
///     #[serde(with = "crate::subaccounts::id::subaccount_map")]
///     accounts: HashMap<SubaccountId, SomeValue>,
/// }
/// ```
pub mod subaccount_map {
    use super::SubaccountId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<V, S>(map: &HashMap<SubaccountId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map {
            ser_map.serialize_entry(&key.to_string(), value)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<SubaccountId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(key, value)| {
                key.parse::<SubaccountId>()
                    .map(|id| (id, value))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_canonical_form() {
        let id = SubaccountId::new("vault:main", 0);
        assert_eq!(id.to_string(), "vault:main#0");
    }

    #[test]
    fn parse_roundtrip() {
        let id = SubaccountId::new("vault:quoting/7", 3);
        let parsed: SubaccountId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_owner_with_hash_takes_last_separator() {
        // rsplit on '#' keeps any earlier '#' inside the owner.
        let parsed: SubaccountId = "weird#owner#5".parse().unwrap();
        assert_eq!(parsed.owner, "weird#owner");
        assert_eq!(parsed.number, 5);
    }

    #[test]
    fn parse_missing_separator_rejected() {
        let err = "no-separator".parse::<SubaccountId>().unwrap_err();
        assert_eq!(err, ParseSubaccountIdError::MissingSeparator);
    }

    #[test]
    fn parse_empty_owner_rejected() {
        let err = "#0".parse::<SubaccountId>().unwrap_err();
        assert_eq!(err, ParseSubaccountIdError::EmptyOwner);
    }

    #[test]
    fn parse_bad_number_rejected() {
        let err = "owner#notanumber".parse::<SubaccountId>().unwrap_err();
        assert_eq!(
            err,
            ParseSubaccountIdError::InvalidNumber("notanumber".to_string())
        );
    }

    #[test]
    fn subaccount_map_serialization_roundtrip() {
        use std::collections::HashMap;

        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Holder {
            #[serde(with = "super::subaccount_map")]
            accounts: HashMap<SubaccountId, u64>,
        }

        let mut accounts = HashMap::new();
        accounts.insert(SubaccountId::new("vault:main", 0), 42u64);
        accounts.insert(SubaccountId::new("vault:quoting/1", 0), 7u64);
        let holder = Holder { accounts };

        let json = serde_json::to_string(&holder).expect("serialize");
        let recovered: Holder = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(holder, recovered);
    }
}
