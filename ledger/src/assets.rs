//! # Asset Identifiers
//!
//! Assets are the fungible instruments the sub-ledger keeps balances for.
//! The vault module itself only ever touches one of them — the settlement
//! asset fixed in [`crate::config`] — but the identifier type is shared
//! with the sub-ledger, which is asset-agnostic.
//!
//! Asset ids are small integers assigned at listing time by the asset
//! registry (external to this module). Id 0 is reserved for the settlement
//! asset and exists from genesis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Numeric identifier of a listed asset.
///
/// Ids are assigned sequentially at listing time and are part of the wire
/// format — they must never be reused or renumbered once assigned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(u32);

impl AssetId {
    /// Creates an `AssetId` from its raw numeric value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AssetInfo
// ---------------------------------------------------------------------------

/// Metadata for a listed asset.
///
/// The canonical record lives in the asset registry; this module only
/// needs it for the settlement asset, exposed via [`usdc`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// The asset's numeric identifier.
    pub id: AssetId,

    /// Human-readable asset name (e.g., "USD Coin").
    pub name: String,

    /// Ticker symbol (e.g., "USDC").
    pub symbol: String,

    /// Display decimals. A raw quantum amount of `1_000_000` with
    /// `decimals = 6` renders as `1.000000`. Rendering only — the
    /// sub-ledger never divides.
    pub decimals: u8,
}

/// The settlement asset: USDC, asset id 0, six decimals.
///
/// This is the only asset the vault module moves. It is fixed for the
/// module's lifetime and not request-selectable.
pub fn usdc() -> AssetInfo {
    AssetInfo {
        id: config::SETTLEMENT_ASSET,
        name: "USD Coin".to_string(),
        symbol: config::SETTLEMENT_ASSET_SYMBOL.to_string(),
        decimals: config::SETTLEMENT_ASSET_DECIMALS,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_value_roundtrip() {
        let id = AssetId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{}", id), "7");
        assert_eq!(format!("{:?}", id), "AssetId(7)");
    }

    #[test]
    fn usdc_is_asset_zero() {
        let info = usdc();
        assert_eq!(info.id, AssetId::new(0));
        assert_eq!(info.symbol, "USDC");
        assert_eq!(info.decimals, 6);
    }

    #[test]
    fn asset_info_serialization_roundtrip() {
        let info = usdc();
        let json = serde_json::to_string(&info).expect("serialize");
        let recovered: AssetInfo = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(info, recovered);
    }
}
