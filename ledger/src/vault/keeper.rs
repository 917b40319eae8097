//! # Vault Keeper
//!
//! The keeper services the module's requests. Fund movements follow a
//! strict three-step shape:
//!
//! 1. **Authorize** — the caller must be a module authority or the
//!    current operator. Read-only, side-effect free.
//! 2. **Existence** — the target vault must have a params record. Still
//!    no mutation.
//! 3. **Delegate** — derive the vault's sub-account and hand the movement
//!    to the sub-ledger's transfer primitive. This is the only
//!    state-mutating step, and any ledger failure surfaces verbatim.
//!
//! ## Transactional Contract
//!
//! Every operation assumes it runs inside a scoped transaction owned by
//! the enclosing execution engine: if the operation returns an error, the
//! caller must abort that transaction so the whole invocation's effects
//! (zero or one ledger mutation) are discarded. The keeper never retries
//! and never compensates. `&mut self` encodes the engine's single-writer
//! discipline: there is no interior locking and no suspension point.
//!
//! ## Authority Model
//!
//! The module-authority set is injected at construction and treated as an
//! opaque capability: membership is whatever the embedding process
//! configured, not a protocol constant. The operator is the one
//! *configurable* principal with fund-movement rights; configuration
//! writes (vault params, operator rotation) require a module authority.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::error::VaultError;
use super::id::VaultId;
use super::msgs::{
    AllocateToVaultAck, AllocateToVaultRequest, RetrieveFromVaultAck, RetrieveFromVaultRequest,
    SetOperatorParamsAck, SetOperatorParamsRequest, SetVaultParamsAck, SetVaultParamsRequest,
};
use super::params::{OperatorParams, VaultParams};
use super::registry::VaultRegistry;
use crate::config;
use crate::subaccounts::SubaccountLedger;

/// The vault module's keeper, generic over the sub-ledger it delegates to.
pub struct Keeper<L: SubaccountLedger> {
    /// Module authorities, injected at construction.
    authorities: HashSet<String>,

    /// Vault params store + operator singleton.
    registry: VaultRegistry,

    /// The accounting layer all fund movements go through.
    ledger: L,
}

impl<L: SubaccountLedger> Keeper<L> {
    /// Creates a keeper with the given authority set, operator, and
    /// sub-ledger.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidParams`] if the operator record is
    /// malformed (an empty operator would make the authorization equality
    /// check meaningless).
    pub fn new(
        authorities: impl IntoIterator<Item = String>,
        operator: OperatorParams,
        ledger: L,
    ) -> Result<Self, VaultError> {
        operator.validate()?;
        Ok(Self {
            authorities: authorities.into_iter().collect(),
            registry: VaultRegistry::new(operator),
            ledger,
        })
    }

    // -----------------------------------------------------------------------
    // Fund Movements
    // -----------------------------------------------------------------------

    /// Moves exactly `quote_quantums` of the settlement asset from the
    /// vault's sub-account into the main pooling account.
    ///
    /// On success the acknowledgment is empty: no receipt, no balance
    /// snapshot. Exactly one ledger mutation happens, and only after both
    /// checks pass.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidAuthority`] — caller is neither a module
    ///   authority nor the operator.
    /// - [`VaultError::VaultNotFound`] — no params record for the vault.
    /// - [`VaultError::Transfer`] — whatever the sub-ledger reported,
    ///   verbatim.
    pub fn retrieve_from_vault(
        &mut self,
        req: &RetrieveFromVaultRequest,
    ) -> Result<RetrieveFromVaultAck, VaultError> {
        self.authorize_movement(&req.authority)?;
        self.require_vault(&req.vault_id)?;

        self.ledger.transfer(
            &req.vault_id.to_subaccount_id(),
            &config::main_pool_subaccount(),
            config::SETTLEMENT_ASSET,
            &req.quote_quantums,
        )?;

        debug!(
            vault = %req.vault_id,
            quantums = %req.quote_quantums,
            "retrieved from vault to main pool"
        );
        Ok(RetrieveFromVaultAck::default())
    }

    /// Moves exactly `quote_quantums` of the settlement asset from the
    /// main pooling account into the vault's sub-account — the mirror of
    /// [`retrieve_from_vault`](Self::retrieve_from_vault), with the same
    /// gating and the same error taxonomy.
    pub fn allocate_to_vault(
        &mut self,
        req: &AllocateToVaultRequest,
    ) -> Result<AllocateToVaultAck, VaultError> {
        self.authorize_movement(&req.authority)?;
        self.require_vault(&req.vault_id)?;

        self.ledger.transfer(
            &config::main_pool_subaccount(),
            &req.vault_id.to_subaccount_id(),
            config::SETTLEMENT_ASSET,
            &req.quote_quantums,
        )?;

        debug!(
            vault = %req.vault_id,
            quantums = %req.quote_quantums,
            "allocated from main pool to vault"
        );
        Ok(AllocateToVaultAck::default())
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Creates or updates a vault's params record. This is the
    /// registration path — a vault exists once its first record lands.
    ///
    /// Requires a module authority; the operator is deliberately not
    /// accepted here.
    pub fn set_vault_params(
        &mut self,
        req: &SetVaultParamsRequest,
    ) -> Result<SetVaultParamsAck, VaultError> {
        self.authorize_config(&req.authority)?;
        req.vault_params.validate()?;

        self.registry
            .set_vault_params(req.vault_id, req.vault_params.clone());
        debug!(vault = %req.vault_id, status = %req.vault_params.status, "vault params written");
        Ok(SetVaultParamsAck::default())
    }

    /// Rotates the operator singleton. Requires a module authority; the
    /// operator cannot appoint a successor.
    pub fn set_operator_params(
        &mut self,
        req: &SetOperatorParamsRequest,
    ) -> Result<SetOperatorParamsAck, VaultError> {
        self.authorize_config(&req.authority)?;
        req.params.validate()?;

        debug!(operator = %req.params.operator, "operator rotated");
        self.registry.set_operator_params(req.params.clone());
        Ok(SetOperatorParamsAck::default())
    }

    // -----------------------------------------------------------------------
    // Read Access
    // -----------------------------------------------------------------------

    /// Returns `true` if the principal is in the injected module-authority
    /// set. The operator is not an authority; it is checked separately.
    pub fn is_authority(&self, principal: &str) -> bool {
        self.authorities.contains(principal)
    }

    /// Looks up a vault's params record.
    pub fn vault_params(&self, id: &VaultId) -> Option<&VaultParams> {
        self.registry.vault_params(id)
    }

    /// Returns the current operator singleton.
    pub fn operator_params(&self) -> &OperatorParams {
        self.registry.operator_params()
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &VaultRegistry {
        &self.registry
    }

    /// Read access to the sub-ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the sub-ledger, for genesis seeding and tests.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // -----------------------------------------------------------------------
    // Internal Helpers
    // -----------------------------------------------------------------------

    /// Gate for fund movements: module authority or current operator.
    fn authorize_movement(&self, authority: &str) -> Result<(), VaultError> {
        let operator = &self.registry.operator_params().operator;
        if !self.is_authority(authority) && authority != operator {
            warn!(%authority, "fund movement rejected: invalid authority");
            return Err(VaultError::InvalidAuthority {
                authority: authority.to_string(),
            });
        }
        Ok(())
    }

    /// Gate for configuration writes: module authority only.
    fn authorize_config(&self, authority: &str) -> Result<(), VaultError> {
        if !self.is_authority(authority) {
            warn!(%authority, "configuration write rejected: invalid authority");
            return Err(VaultError::InvalidAuthority {
                authority: authority.to_string(),
            });
        }
        Ok(())
    }

    /// Existence proof: the vault's params record must be present.
    fn require_vault(&self, vault_id: &VaultId) -> Result<(), VaultError> {
        if !self.registry.contains(vault_id) {
            return Err(VaultError::VaultNotFound {
                vault_id: *vault_id,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subaccounts::InMemoryLedger;
    use crate::vault::params::{ParamsError, QuotingParams, VaultStatus};
    use num_bigint::BigUint;

    const GOV: &str = "authority:governance";
    const OP: &str = "op1";

    fn keeper() -> Keeper<InMemoryLedger> {
        Keeper::new(
            [GOV.to_string()],
            OperatorParams::new(OP),
            InMemoryLedger::new(),
        )
        .unwrap()
    }

    fn register(keeper: &mut Keeper<InMemoryLedger>, id: VaultId) {
        keeper
            .set_vault_params(&SetVaultParamsRequest {
                authority: GOV.to_string(),
                vault_id: id,
                vault_params: VaultParams::new(VaultStatus::Quoting),
            })
            .unwrap();
    }

    #[test]
    fn empty_operator_rejected_at_construction() {
        let result = Keeper::new(
            [GOV.to_string()],
            OperatorParams::new(""),
            InMemoryLedger::new(),
        );
        assert!(matches!(
            result,
            Err(VaultError::InvalidParams(ParamsError::EmptyOperator))
        ));
    }

    #[test]
    fn operator_is_not_an_authority() {
        let k = keeper();
        assert!(k.is_authority(GOV));
        assert!(!k.is_authority(OP));
        assert_eq!(k.operator_params().operator, OP);
    }

    #[test]
    fn retrieve_requires_authorization_before_existence() {
        // The vault is missing too, but authorization is checked first.
        let mut k = keeper();
        let err = k
            .retrieve_from_vault(&RetrieveFromVaultRequest {
                authority: "attacker".to_string(),
                vault_id: VaultId::quoting(99),
                quote_quantums: BigUint::from(1u32),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::InvalidAuthority { ref authority } if authority == "attacker"
        ));
    }

    #[test]
    fn retrieve_from_unregistered_vault_rejected() {
        let mut k = keeper();
        let err = k
            .retrieve_from_vault(&RetrieveFromVaultRequest {
                authority: OP.to_string(),
                vault_id: VaultId::quoting(99),
                quote_quantums: BigUint::from(1u32),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::VaultNotFound { vault_id } if vault_id == VaultId::quoting(99)
        ));
    }

    #[test]
    fn operator_can_retrieve() {
        let mut k = keeper();
        let vault = VaultId::quoting(0);
        register(&mut k, vault);
        k.ledger_mut().credit(
            &vault.to_subaccount_id(),
            config::SETTLEMENT_ASSET,
            &BigUint::from(1_000u32),
        );

        k.retrieve_from_vault(&RetrieveFromVaultRequest {
            authority: OP.to_string(),
            vault_id: vault,
            quote_quantums: BigUint::from(400u32),
        })
        .unwrap();

        assert_eq!(
            k.ledger()
                .balance_of(&vault.to_subaccount_id(), config::SETTLEMENT_ASSET),
            BigUint::from(600u32)
        );
        assert_eq!(
            k.ledger()
                .balance_of(&config::main_pool_subaccount(), config::SETTLEMENT_ASSET),
            BigUint::from(400u32)
        );
    }

    #[test]
    fn module_authority_can_retrieve() {
        let mut k = keeper();
        let vault = VaultId::quoting(0);
        register(&mut k, vault);
        k.ledger_mut().credit(
            &vault.to_subaccount_id(),
            config::SETTLEMENT_ASSET,
            &BigUint::from(50u32),
        );

        k.retrieve_from_vault(&RetrieveFromVaultRequest {
            authority: GOV.to_string(),
            vault_id: vault,
            quote_quantums: BigUint::from(50u32),
        })
        .unwrap();
    }

    #[test]
    fn ledger_failure_propagates_verbatim() {
        let mut k = keeper();
        let vault = VaultId::quoting(0);
        register(&mut k, vault);

        let err = k
            .retrieve_from_vault(&RetrieveFromVaultRequest {
                authority: OP.to_string(),
                vault_id: vault,
                quote_quantums: BigUint::from(1u32),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::Transfer(crate::subaccounts::LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn allocate_mirrors_retrieve() {
        let mut k = keeper();
        let vault = VaultId::quoting(3);
        register(&mut k, vault);
        k.ledger_mut().credit(
            &config::main_pool_subaccount(),
            config::SETTLEMENT_ASSET,
            &BigUint::from(900u32),
        );

        k.allocate_to_vault(&AllocateToVaultRequest {
            authority: OP.to_string(),
            vault_id: vault,
            quote_quantums: BigUint::from(300u32),
        })
        .unwrap();

        assert_eq!(
            k.ledger()
                .balance_of(&vault.to_subaccount_id(), config::SETTLEMENT_ASSET),
            BigUint::from(300u32)
        );
        assert_eq!(
            k.ledger()
                .balance_of(&config::main_pool_subaccount(), config::SETTLEMENT_ASSET),
            BigUint::from(600u32)
        );
    }

    #[test]
    fn allocate_to_unregistered_vault_rejected() {
        let mut k = keeper();
        let err = k
            .allocate_to_vault(&AllocateToVaultRequest {
                authority: GOV.to_string(),
                vault_id: VaultId::quoting(8),
                quote_quantums: BigUint::from(1u32),
            })
            .unwrap_err();
        assert!(matches!(err, VaultError::VaultNotFound { .. }));
    }

    #[test]
    fn operator_cannot_set_vault_params() {
        let mut k = keeper();
        let err = k
            .set_vault_params(&SetVaultParamsRequest {
                authority: OP.to_string(),
                vault_id: VaultId::quoting(0),
                vault_params: VaultParams::new(VaultStatus::StandBy),
            })
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidAuthority { .. }));
        assert!(k.vault_params(&VaultId::quoting(0)).is_none());
    }

    #[test]
    fn authority_can_set_and_update_vault_params() {
        let mut k = keeper();
        let vault = VaultId::quoting(0);
        register(&mut k, vault);
        assert_eq!(k.vault_params(&vault).unwrap().status, VaultStatus::Quoting);

        k.set_vault_params(&SetVaultParamsRequest {
            authority: GOV.to_string(),
            vault_id: vault,
            vault_params: VaultParams::new(VaultStatus::CloseOnly),
        })
        .unwrap();
        assert_eq!(
            k.vault_params(&vault).unwrap().status,
            VaultStatus::CloseOnly
        );
    }

    #[test]
    fn malformed_vault_params_rejected() {
        let mut k = keeper();
        let bad = QuotingParams {
            order_expiration_seconds: 0,
            ..QuotingParams::default()
        };
        let err = k
            .set_vault_params(&SetVaultParamsRequest {
                authority: GOV.to_string(),
                vault_id: VaultId::quoting(0),
                vault_params: VaultParams::new(VaultStatus::Quoting).with_quoting_params(bad),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::InvalidParams(ParamsError::ZeroOrderExpiration)
        ));
        assert!(k.vault_params(&VaultId::quoting(0)).is_none());
    }

    #[test]
    fn authority_rotates_operator_and_old_operator_loses_access() {
        let mut k = keeper();
        let vault = VaultId::quoting(0);
        register(&mut k, vault);

        k.set_operator_params(&SetOperatorParamsRequest {
            authority: GOV.to_string(),
            params: OperatorParams::new("op2"),
        })
        .unwrap();

        let err = k
            .retrieve_from_vault(&RetrieveFromVaultRequest {
                authority: OP.to_string(),
                vault_id: vault,
                quote_quantums: BigUint::from(0u32),
            })
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidAuthority { .. }));

        // The new operator is accepted (zero quantums: nothing to fund).
        k.retrieve_from_vault(&RetrieveFromVaultRequest {
            authority: "op2".to_string(),
            vault_id: vault,
            quote_quantums: BigUint::from(0u32),
        })
        .unwrap();
    }

    #[test]
    fn operator_cannot_rotate_operator() {
        let mut k = keeper();
        let err = k
            .set_operator_params(&SetOperatorParamsRequest {
                authority: OP.to_string(),
                params: OperatorParams::new("op-shadow"),
            })
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidAuthority { .. }));
        assert_eq!(k.operator_params().operator, OP);
    }
}
