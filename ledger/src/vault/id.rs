//! # Vault Identifiers
//!
//! A vault is addressed by a structured key: the kind of strategy it runs
//! plus a market number. The canonical string form is `<kind>/<number>`,
//! e.g. `quoting/7`.
//!
//! Every vault owns exactly one sub-ledger account, derived by
//! [`VaultId::to_subaccount_id`]. The derivation is a pure function with
//! no side effects, defined for every vault id, and injective: the owner
//! address embeds the full structured key verbatim rather than hashing it,
//! so two distinct vaults can never share a sub-account — and none can
//! collide with the main pooling account, whose owner carries no
//! `/<number>` suffix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config;
use crate::subaccounts::SubaccountId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when parsing a vault id from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseVaultIdError {
    /// The string has no `/` separator between kind and number.
    #[error("missing '/' separator in vault id")]
    MissingSeparator,

    /// The kind part names no known vault kind.
    #[error("unknown vault kind: {0}")]
    UnknownKind(String),

    /// The number part is not a valid u32.
    #[error("invalid vault number: {0}")]
    InvalidNumber(String),
}

// ---------------------------------------------------------------------------
// VaultKind
// ---------------------------------------------------------------------------

/// The strategy class a vault runs.
///
/// There is a single kind today — market-making vaults that quote on an
/// order book. The kind is part of the sub-account derivation and of the
/// wire format, so its string tag must never change once assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaultKind {
    /// A market-making vault quoting a single market.
    Quoting,
}

impl VaultKind {
    /// Returns the stable string tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultKind::Quoting => "quoting",
        }
    }
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultKind {
    type Err = ParseVaultIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quoting" => Ok(VaultKind::Quoting),
            other => Err(ParseVaultIdError::UnknownKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// VaultId
// ---------------------------------------------------------------------------

/// Structured key identifying one vault: a strategy kind plus the number
/// of the market it operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultId {
    /// The strategy class this vault runs.
    pub kind: VaultKind,

    /// The market number the vault operates on.
    pub number: u32,
}

impl VaultId {
    /// Creates a vault id from its parts.
    pub fn new(kind: VaultKind, number: u32) -> Self {
        Self { kind, number }
    }

    /// Convenience constructor for a quoting vault on the given market.
    pub fn quoting(number: u32) -> Self {
        Self::new(VaultKind::Quoting, number)
    }

    /// Derives the sub-ledger account owned by this vault.
    ///
    /// Pure and deterministic: the owner address is
    /// `vault:<kind>/<number>` with account number 0. The structured key
    /// is embedded verbatim, which makes the derivation injective by
    /// construction — no hashing, no truncation, no collisions.
    pub fn to_subaccount_id(&self) -> SubaccountId {
        SubaccountId::new(
            format!("{}{}/{}", config::VAULT_OWNER_PREFIX, self.kind, self.number),
            0,
        )
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.number)
    }
}

impl FromStr for VaultId {
    type Err = ParseVaultIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, number) = s
            .split_once('/')
            .ok_or(ParseVaultIdError::MissingSeparator)?;
        let kind = kind.parse::<VaultKind>()?;
        let number = number
            .parse::<u32>()
            .map_err(|_| ParseVaultIdError::InvalidNumber(number.to_string()))?;
        Ok(Self::new(kind, number))
    }
}

// ---------------------------------------------------------------------------
// Serde helper: serialize HashMap<VaultId, V> with string keys
// ---------------------------------------------------------------------------

/// Serde helper module for serializing/deserializing `HashMap<VaultId, V>`
/// as a JSON object keyed by the canonical `<kind>/<number>` string.
///
/// Same shape as `crate::subaccounts::id::subaccount_map` — JSON map keys
/// must be strings, and `VaultId` is a struct.
pub mod vault_id_map {
    use super::VaultId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<V, S>(map: &HashMap<VaultId, V>, serializer: S) -> Result<S::Ok, S::Error>
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

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<VaultId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(key, value)| {
                key.parse::<VaultId>()
                    .map(|id| (id, value))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
