//! # Module Constants
//!
//! Every magic value the vault module relies on lives here. The settlement
//! asset and the main pooling account are consensus-critical: changing them
//! after launch re-routes live capital, so they are constants, not
//! parameters — callers cannot select them per request.

use crate::assets::AssetId;
use crate::subaccounts::SubaccountId;

// ---------------------------------------------------------------------------
// Module Identity
// ---------------------------------------------------------------------------

/// Name of this module inside the state machine. Used as the namespace
/// prefix for every sub-account the module owns.
pub const MODULE_NAME: &str = "vault";

// ---------------------------------------------------------------------------
// Settlement Asset
// ---------------------------------------------------------------------------

/// The fixed settlement asset every vault transfer is denominated in.
/// Asset id 0 is USDC by convention — the quote asset of the whole engine.
pub const SETTLEMENT_ASSET: AssetId = AssetId::new(0);

/// Ticker symbol of the settlement asset.
pub const SETTLEMENT_ASSET_SYMBOL: &str = "USDC";

/// Display decimals of the settlement asset. One quantum is 10^-6 USDC.
/// The module never divides — this is for rendering only.
pub const SETTLEMENT_ASSET_DECIMALS: u8 = 6;

// ---------------------------------------------------------------------------
// Main Pooling Account
// ---------------------------------------------------------------------------

/// Owner address of the main pooling account. Deliberately outside the
/// derived-vault namespace: derived vault owners always contain a
/// `/<number>` suffix, so `vault:main` can never collide with one.
pub const MAIN_POOL_OWNER: &str = "vault:main";

/// Account number of the main pooling account.
pub const MAIN_POOL_NUMBER: u32 = 0;

/// Owner-address prefix for sub-accounts derived from vault identifiers.
pub const VAULT_OWNER_PREFIX: &str = "vault:";

/// Returns the main pooling account — the fixed destination for retrieved
/// vault funds and the fixed source for vault allocations.
pub fn main_pool_subaccount() -> SubaccountId {
    SubaccountId::new(MAIN_POOL_OWNER, MAIN_POOL_NUMBER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::VaultId;

    #[test]
    fn main_pool_is_stable() {
        assert_eq!(main_pool_subaccount(), main_pool_subaccount());
        assert_eq!(main_pool_subaccount().owner, MAIN_POOL_OWNER);
        assert_eq!(main_pool_subaccount().number, MAIN_POOL_NUMBER);
    }

    #[test]
    fn main_pool_outside_derived_namespace() {
        // Every derived vault owner carries a "/<number>" suffix; the main
        // pool owner must not, or derivation stops being injective.
        assert!(!MAIN_POOL_OWNER.contains('/'));
        let derived = VaultId::quoting(0).to_subaccount_id();
        assert_ne!(derived, main_pool_subaccount());
    }

    #[test]
    fn settlement_asset_is_usdc() {
        assert_eq!(SETTLEMENT_ASSET.value(), 0);
        assert_eq!(crate::assets::usdc().id, SETTLEMENT_ASSET);
        assert_eq!(crate::assets::usdc().decimals, SETTLEMENT_ASSET_DECIMALS);
    }
}
