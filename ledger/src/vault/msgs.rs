//! # Request & Acknowledgment Types
//!
//! One request/ack pair per keeper operation. Requests carry the caller's
//! asserted principal in `authority` — the transport layer has already
//! authenticated it; the keeper only decides whether it is *authorized*.
//!
//! `validate()` on each request covers the stateless checks a transport
//! layer runs before admission (non-empty authority, well-formed params).
//! The keeper does not re-run them: its own error taxonomy is reserved
//! for authorization, existence, and ledger outcomes.
//!
//! Quantities are [`BigUint`] quantums of the settlement asset —
//! non-negative by construction, arbitrary precision, exact.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::VaultId;
use super::params::{OperatorParams, ParamsError, VaultParams};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Stateless admission failures for requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The authority field is empty.
    #[error("authority must not be empty")]
    EmptyAuthority,

    /// An embedded parameter record is malformed.
    #[error(transparent)]
    Params(#[from] ParamsError),
}

fn validate_authority(authority: &str) -> Result<(), RequestError> {
    if authority.is_empty() {
        return Err(RequestError::EmptyAuthority);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// RetrieveFromVault
// ---------------------------------------------------------------------------

/// Request to move quantums from a vault's sub-account into the main
/// pooling account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetrieveFromVaultRequest {
    /// Principal asserted by the transport layer.
    pub authority: String,

    /// The vault to retrieve from. Must be registered.
    pub vault_id: VaultId,

    /// Exact amount to move, in settlement-asset quantums. No
    /// partial-fill semantics; zero is permitted and moves nothing.
    pub quote_quantums: BigUint,
}

impl RetrieveFromVaultRequest {
    /// Stateless admission checks.
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_authority(&self.authority)
    }
}

/// Empty acknowledgment for a successful retrieval. No receipt, balance
/// snapshot, or identifier is returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveFromVaultAck {}

// ---------------------------------------------------------------------------
// AllocateToVault
// ---------------------------------------------------------------------------

/// Request to move quantums from the main pooling account into a vault's
/// sub-account — the mirror of retrieval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocateToVaultRequest {
    /// Principal asserted by the transport layer.
    pub authority: String,

    /// The vault to allocate to. Must be registered.
    pub vault_id: VaultId,

    /// Exact amount to move, in settlement-asset quantums.
    pub quote_quantums: BigUint,
}

impl AllocateToVaultRequest {
    /// Stateless admission checks.
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_authority(&self.authority)
    }
}

/// Empty acknowledgment for a successful allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateToVaultAck {}

// ---------------------------------------------------------------------------
// SetVaultParams
// ---------------------------------------------------------------------------

/// Request to create or update a vault's params record. This is the
/// registration path: a vault exists once its first record is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetVaultParamsRequest {
    /// Principal asserted by the transport layer. Must be a module
    /// authority — the operator may move funds but not rewrite
    /// configuration.
    pub authority: String,

    /// The vault whose record is written.
    pub vault_id: VaultId,

    /// The record to store.
    pub vault_params: VaultParams,
}

impl SetVaultParamsRequest {
    /// Stateless admission checks: authority present, record well-formed.
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_authority(&self.authority)?;
        self.vault_params.validate()?;
        Ok(())
    }
}

/// Empty acknowledgment for a successful params write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVaultParamsAck {}

// ---------------------------------------------------------------------------
// SetOperatorParams
// ---------------------------------------------------------------------------

/// Request to rotate the operator singleton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOperatorParamsRequest {
    /// Principal asserted by the transport layer. Must be a module
    /// authority — the operator cannot appoint a successor.
    pub authority: String,

    /// The new operator record.
    pub params: OperatorParams,
}

impl SetOperatorParamsRequest {
    /// Stateless admission checks: authority present, operator non-empty.
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_authority(&self.authority)?;
        self.params.validate()?;
        Ok(())
    }
}

/// Empty acknowledgment for a successful operator rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOperatorParamsAck {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::params::{QuotingParams, VaultStatus};

    #[test]
    fn retrieve_request_validates_authority() {
        let req = RetrieveFromVaultRequest {
            authority: String::new(),
            vault_id: VaultId::quoting(0),
            quote_quantums: BigUint::from(1u32),
        };
        assert_eq!(req.validate(), Err(RequestError::EmptyAuthority));
    }

    #[test]
    fn retrieve_request_accepts_zero_quantums() {
        let req = RetrieveFromVaultRequest {
            authority: "op1".to_string(),
            vault_id: VaultId::quoting(0),
            quote_quantums: BigUint::from(0u32),
        };
        req.validate().unwrap();
    }

    #[test]
    fn set_vault_params_request_validates_record() {
        let bad = QuotingParams {
            spread_min_ppm: 0,
            ..QuotingParams::default()
        };
        let req = SetVaultParamsRequest {
            authority: "gov".to_string(),
            vault_id: VaultId::quoting(0),
            vault_params: VaultParams::new(VaultStatus::Quoting).with_quoting_params(bad),
        };
        assert_eq!(
            req.validate(),
            Err(RequestError::Params(ParamsError::ZeroSpreadMin))
        );
    }

    #[test]
    fn set_operator_params_request_validates_operator() {
        let req = SetOperatorParamsRequest {
            authority: "gov".to_string(),
            params: OperatorParams::new(""),
        };
        assert_eq!(
            req.validate(),
            Err(RequestError::Params(ParamsError::EmptyOperator))
        );
    }

    #[test]
    fn request_serialization_roundtrip() {
        let req = RetrieveFromVaultRequest {
            authority: "op1".to_string(),
            vault_id: VaultId::quoting(7),
            quote_quantums: BigUint::from(1_000u32),
        };
        let json = serde_json::to_string(&req).expect("serialize");
        let recovered: RetrieveFromVaultRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(req, recovered);
    }
}
