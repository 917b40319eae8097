//! # Vault & Operator Parameters
//!
//! Two kinds of configuration records live in this module:
//!
//! - [`VaultParams`] — per-vault configuration. The presence of this
//!   record in the registry is the *sole* existence proof for a vault:
//!   no params record, no vault, no transfer.
//! - [`OperatorParams`] — a module-wide singleton naming the one
//!   principal that holds transfer authority in addition to the fixed
//!   module authorities.
//!
//! Both records are written by parameter operations and read-only for the
//! fund-movement paths.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Validation failures for parameter records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// Quoting spread floor must be positive.
    #[error("spread_min_ppm must be positive")]
    ZeroSpreadMin,

    /// Order size must be positive.
    #[error("order_size_pct_ppm must be positive")]
    ZeroOrderSize,

    /// Order expiration must be positive.
    #[error("order_expiration_seconds must be positive")]
    ZeroOrderExpiration,

    /// The operator principal must not be empty.
    #[error("operator must not be empty")]
    EmptyOperator,
}

// ---------------------------------------------------------------------------
// VaultStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a vault.
///
/// The status gates the vault's own quoting activity elsewhere in the
/// engine; fund movements through the keeper are not status-gated — an
/// operator can retrieve from a deactivated vault while winding it down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultStatus {
    /// Not operating; existing positions are being unwound.
    Deactivated,
    /// Registered but not quoting yet.
    StandBy,
    /// Actively quoting its market.
    Quoting,
    /// Only reducing exposure; no new quotes that would increase it.
    CloseOnly,
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultStatus::Deactivated => write!(f, "Deactivated"),
            VaultStatus::StandBy => write!(f, "StandBy"),
            VaultStatus::Quoting => write!(f, "Quoting"),
            VaultStatus::CloseOnly => write!(f, "CloseOnly"),
        }
    }
}

// ---------------------------------------------------------------------------
// QuotingParams
// ---------------------------------------------------------------------------

/// Quoting knobs for a market-making vault.
///
/// All ratios are in parts-per-million so the records stay integer-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotingParams {
    /// Minimum half-spread the vault will quote, in ppm of the oracle price.
    pub spread_min_ppm: u32,

    /// Extra spread buffer applied on top of the market's own spread, in ppm.
    pub spread_buffer_ppm: u32,

    /// How aggressively quotes skew against inventory, in ppm.
    pub skew_factor_ppm: u32,

    /// Size of each order as a fraction of vault equity, in ppm.
    pub order_size_pct_ppm: u32,

    /// Seconds until a resting order expires and is re-quoted.
    pub order_expiration_seconds: u32,

    /// Equity threshold below which the vault stays out of the market,
    /// in settlement-asset quantums.
    pub activation_threshold_quote_quantums: BigUint,
}

impl QuotingParams {
    /// Checks the structural invariants of the record.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.spread_min_ppm == 0 {
            return Err(ParamsError::ZeroSpreadMin);
        }
        if self.order_size_pct_ppm == 0 {
            return Err(ParamsError::ZeroOrderSize);
        }
        if self.order_expiration_seconds == 0 {
            return Err(ParamsError::ZeroOrderExpiration);
        }
        Ok(())
    }
}

impl Default for QuotingParams {
    /// Conservative defaults for a freshly registered quoting vault.
    fn default() -> Self {
        Self {
            spread_min_ppm: 3_000,
            spread_buffer_ppm: 1_500,
            skew_factor_ppm: 2_000_000,
            order_size_pct_ppm: 100_000,
            order_expiration_seconds: 60,
            activation_threshold_quote_quantums: BigUint::from(1_000_000_000u64),
        }
    }
}

// ---------------------------------------------------------------------------
// VaultParams
// ---------------------------------------------------------------------------

/// Per-vault configuration record, associated 1:1 with a vault id.
///
/// Created and updated by the parameter operations; read-only for fund
/// movements, which use its mere presence as the existence proof.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaultParams {
    /// Current lifecycle status.
    pub status: VaultStatus,

    /// Quoting configuration. `None` means the vault inherits the
    /// module-default quoting behavior.
    pub quoting_params: Option<QuotingParams>,

    /// When the record was first written.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl VaultParams {
    /// Creates a params record with the given status and no quoting
    /// overrides, stamped now.
    pub fn new(status: VaultStatus) -> Self {
        let now = Utc::now();
        Self {
            status,
            quoting_params: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches explicit quoting params to the record.
    pub fn with_quoting_params(mut self, quoting_params: QuotingParams) -> Self {
        self.quoting_params = Some(quoting_params);
        self
    }

    /// Checks the structural invariants of the record.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if let Some(quoting) = &self.quoting_params {
            quoting.validate()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OperatorParams
// ---------------------------------------------------------------------------

/// Module-wide singleton naming the current operator.
///
/// The operator is the one configurable principal allowed to move vault
/// funds alongside the fixed module authorities. Rotation happens through
/// a parameter operation gated on module authority — the operator cannot
/// appoint a successor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorParams {
    /// The operator principal, compared by exact value equality.
    pub operator: String,

    /// Display metadata for the operator. Informational only.
    pub metadata: OperatorMetadata,

    /// When the operator was last rotated.
    pub updated_at: DateTime<Utc>,
}

/// Free-form display metadata for an operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorMetadata {
    /// Short display name.
    pub name: String,

    /// Longer description of who operates under this principal.
    pub description: String,
}

impl OperatorParams {
    /// Creates operator params with empty metadata, stamped now.
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            metadata: OperatorMetadata::default(),
            updated_at: Utc::now(),
        }
    }

    /// Checks the structural invariants of the record. An empty operator
    /// would make the equality check in authorization meaningless, so it
    /// is rejected here.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.operator.is_empty() {
            return Err(ParamsError::EmptyOperator);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
