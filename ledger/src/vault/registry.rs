//! # Vault Registry
//!
//! The registry is the module's parameter store: one [`VaultParams`]
//! record per registered vault, plus the [`OperatorParams`] singleton.
//!
//! Registry presence is load-bearing — a vault *exists* exactly when its
//! params record does, and every fund movement checks that before touching
//! the sub-ledger. Records are upserted by the parameter operations and
//! never mutated in place by the movement paths.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::id::VaultId;
use super::params::{OperatorParams, VaultParams};

/// In-memory parameter store for the vault module.
///
/// Reads and writes happen under the enclosing engine's single-writer
/// discipline; the registry performs no locking of its own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultRegistry {
    /// Vault params keyed by vault id.
    #[serde(with = "crate::vault::id::vault_id_map")]
    vaults: HashMap<VaultId, VaultParams>,

    /// The operator singleton.
    operator: OperatorParams,
}

impl VaultRegistry {
    /// Creates an empty registry with the given operator.
    ///
    /// The caller is responsible for having validated the operator params
    /// (genesis and the keeper constructor both do).
    pub fn new(operator: OperatorParams) -> Self {
        Self {
            vaults: HashMap::new(),
            operator,
        }
    }

    /// Looks up the params record for a vault. `None` means the vault
    /// does not exist.
    pub fn vault_params(&self, id: &VaultId) -> Option<&VaultParams> {
        self.vaults.get(id)
    }

    /// Returns `true` if a params record exists for the vault.
    pub fn contains(&self, id: &VaultId) -> bool {
        self.vaults.contains_key(id)
    }

    /// Upserts a params record.
    ///
    /// On update, the original `created_at` is preserved and `updated_at`
    /// is stamped now; on insert, both are stamped now.
    pub fn set_vault_params(&mut self, id: VaultId, mut params: VaultParams) {
        let now = Utc::now();
        match self.vaults.get(&id) {
            Some(existing) => {
                params.created_at = existing.created_at;
                params.updated_at = now;
            }
            None => {
                params.created_at = now;
                params.updated_at = now;
            }
        }
        self.vaults.insert(id, params);
    }

    /// Returns the operator singleton.
    pub fn operator_params(&self) -> &OperatorParams {
        &self.operator
    }

    /// Replaces the operator singleton, stamping `updated_at` now.
    pub fn set_operator_params(&mut self, mut params: OperatorParams) {
        params.updated_at = Utc::now();
        self.operator = params;
    }

    /// Number of registered vaults.
    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    /// Returns `true` if no vault is registered.
    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    /// Iterates over all registered vaults and their params.
    pub fn iter(&self) -> impl Iterator<Item = (&VaultId, &VaultParams)> {
        self.vaults.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
