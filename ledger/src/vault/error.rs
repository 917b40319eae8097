//! Error types for the vault module.
//!
//! Three stable kinds cover the fund-movement paths — "not allowed",
//! "target missing", and a transparent passthrough for whatever the
//! sub-ledger reports — plus one kind for malformed parameter records on
//! the configuration paths. Every failure is terminal for its request;
//! nothing here is retried or compensated.

use thiserror::Error;

use super::id::VaultId;
use super::params::ParamsError;
use crate::subaccounts::LedgerError;

/// Errors produced by the vault keeper.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The caller is neither a module authority nor the current operator.
    /// Carries the rejected principal for diagnostics.
    #[error("invalid authority {authority}")]
    InvalidAuthority {
        /// The principal that was rejected.
        authority: String,
    },

    /// No params record exists for the vault — the vault does not exist.
    /// Detected before any mutation.
    #[error("vault {vault_id} not found")]
    VaultNotFound {
        /// The unregistered vault id.
        vault_id: VaultId,
    },

    /// The sub-ledger refused the transfer. Propagated verbatim — the
    /// keeper neither interprets nor recovers from ledger faults; the
    /// enclosing transaction rolls back cleanly.
    #[error(transparent)]
    Transfer(#[from] LedgerError),

    /// A parameter record failed validation. Only the configuration
    /// operations produce this; retrieval and allocation never do.
    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamsError),
}
