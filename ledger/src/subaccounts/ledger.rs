//! # The Transfer Primitive
//!
//! [`SubaccountLedger`] is the seam between the vault module and the
//! engine's accounting layer: a single atomic balance movement between two
//! sub-accounts for one asset. The vault keeper is generic over this trait
//! and never assumes a concrete ledger.
//!
//! [`InMemoryLedger`] is the reference implementation, used by every test
//! in this crate and suitable for single-process embedding. Its `transfer`
//! is all-or-nothing: the debit is fully validated before either side is
//! written, so a failed call leaves no partial state behind. Callers still
//! run inside the engine's transaction boundary — the ledger's own
//! atomicity is per call, the transaction's is per request.
//!
//! Amounts are [`BigUint`] quantums: non-negative, arbitrary precision,
//! never floating point. Addition cannot overflow; subtraction is guarded
//! by an explicit balance check.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use super::id::SubaccountId;
use crate::assets::AssetId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced by the transfer primitive.
///
/// These surface to vault-module callers verbatim — the keeper never
/// reinterprets or swallows them.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The source account does not hold enough of the asset.
    #[error(
        "insufficient funds in {subaccount}: available {available}, requested {requested} (asset {asset})"
    )]
    InsufficientBalance {
        /// The account being debited.
        subaccount: SubaccountId,
        /// The asset being moved.
        asset: AssetId,
        /// The balance currently held.
        available: BigUint,
        /// The amount that was requested.
        requested: BigUint,
    },

    /// The source account is frozen and cannot be debited.
    #[error("sub-account {subaccount} is frozen")]
    AccountFrozen {
        /// The frozen account.
        subaccount: SubaccountId,
    },
}

// ---------------------------------------------------------------------------
// SubaccountLedger
// ---------------------------------------------------------------------------

/// The accounting primitive the vault module delegates to.
///
/// `transfer` must be atomic per call: either both the debit and the credit
/// take effect, or neither does. Implementations are invoked under the
/// engine's single-writer discipline and must not lock internally.
pub trait SubaccountLedger {
    /// Moves exactly `quantums` of `asset` from `from` to `to`.
    ///
    /// A zero-quantum transfer succeeds without touching state. Every
    /// failure leaves all balances exactly as they were.
    fn transfer(
        &mut self,
        from: &SubaccountId,
        to: &SubaccountId,
        asset: AssetId,
        quantums: &BigUint,
    ) -> Result<(), LedgerError>;
}

// ---------------------------------------------------------------------------
// InMemoryLedger
// ---------------------------------------------------------------------------

/// Per-account ledger state: one balance bucket per asset, plus a freeze
/// flag for compliance holds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Balances in quantums, keyed by asset.
    balances: HashMap<AssetId, BigUint>,

    /// If `true`, outgoing movements are rejected. Incoming credits are
    /// still accepted so that settlement flows toward this account keep
    /// working.
    frozen: bool,

    /// Timestamp of the last balance-modifying operation.
    last_updated: Option<DateTime<Utc>>,
}

/// In-memory reference implementation of [`SubaccountLedger`].
///
/// Accounts are created lazily on first credit. Absent accounts behave as
/// empty ones: reads return zero, debits fail with insufficient funds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    /// Account entries keyed by sub-account id.
    #[serde(with = "crate::subaccounts::id::subaccount_map")]
    accounts: HashMap<SubaccountId, AccountEntry>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits quantums to an account, creating it if needed.
    ///
    /// This is a protocol-level operation for genesis seeding and incoming
    /// settlement — it bypasses the freeze flag the same way deposits do.
    pub fn credit(&mut self, subaccount: &SubaccountId, asset: AssetId, quantums: &BigUint) {
        let entry = self.accounts.entry(subaccount.clone()).or_default();
        *entry.balances.entry(asset).or_default() += quantums;
        entry.last_updated = Some(Utc::now());
    }

    /// Returns the balance an account holds in `asset`. Absent accounts
    /// and absent buckets both read as zero.
    pub fn balance_of(&self, subaccount: &SubaccountId, asset: AssetId) -> BigUint {
        self.accounts
            .get(subaccount)
            .and_then(|entry| entry.balances.get(&asset))
            .cloned()
            .unwrap_or_default()
    }

    /// Freezes an account, rejecting all outgoing movements until
    /// [`unfreeze`](Self::unfreeze) is called. Creates the entry if the
    /// account has never been credited.
    pub fn freeze(&mut self, subaccount: &SubaccountId) {
        self.accounts.entry(subaccount.clone()).or_default().frozen = true;
    }

    /// Unfreezes an account, restoring normal operation.
    pub fn unfreeze(&mut self, subaccount: &SubaccountId) {
        if let Some(entry) = self.accounts.get_mut(subaccount) {
            entry.frozen = false;
        }
    }

    /// Returns `true` if the account is currently frozen.
    pub fn is_frozen(&self, subaccount: &SubaccountId) -> bool {
        self.accounts
            .get(subaccount)
            .map(|entry| entry.frozen)
            .unwrap_or(false)
    }

    /// Returns the number of accounts the ledger has entries for.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl SubaccountLedger for InMemoryLedger {
    fn transfer(
        &mut self,
        from: &SubaccountId,
        to: &SubaccountId,
        asset: AssetId,
        quantums: &BigUint,
    ) -> Result<(), LedgerError> {
        if quantums.is_zero() {
            return Ok(());
        }

        if self.is_frozen(from) {
            return Err(LedgerError::AccountFrozen {
                subaccount: from.clone(),
            });
        }

        // Validate the debit completely before writing either side.
        let available = self.balance_of(from, asset);
        if available < *quantums {
            return Err(LedgerError::InsufficientBalance {
                subaccount: from.clone(),
                asset,
                available,
                requested: quantums.clone(),
            });
        }

        let now = Utc::now();
        let new_source_balance = available - quantums;
        let source = self.accounts.entry(from.clone()).or_default();
        source.balances.insert(asset, new_source_balance);
        source.last_updated = Some(now);

        let dest = self.accounts.entry(to.clone()).or_default();
        *dest.balances.entry(asset).or_default() += quantums;
        dest.last_updated = Some(now);

        debug!(%from, %to, %asset, %quantums, "sub-ledger transfer applied");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
