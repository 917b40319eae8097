//! # Vault Module — Pooled-Capital Management
//!
//! Vaults are pooled-capital accounts tracked by the sub-ledger. This
//! module decides *who may move their funds* and *whether they exist*,
//! then delegates the actual balance movement to the accounting layer.
//!
//! ## Architecture
//!
//! ```text
//! id.rs       — VaultId: structured key + sub-account derivation
//! params.rs   — VaultParams / OperatorParams records and validation
//! registry.rs — the parameter store (existence proof lives here)
//! msgs.rs     — request/ack types with stateless admission checks
//! error.rs    — the module's error taxonomy
//! keeper.rs   — request handlers: authorize → existence → delegate
//! ```
//!
//! ## Design Principles
//!
//! 1. **Checks precede mutation.** Authorization and existence are
//!    read-only; the sub-ledger transfer is the only mutating step and
//!    runs last.
//! 2. **The settlement asset is fixed.** Callers choose amounts, never
//!    assets or destinations.
//! 3. **Ledger failures pass through verbatim.** The module adds its own
//!    two error kinds and otherwise stays out of the accounting layer's
//!    way.

pub mod error;
pub mod id;
pub mod keeper;
pub mod msgs;
pub mod params;
pub mod registry;

pub use error::VaultError;
pub use id::{ParseVaultIdError, VaultId, VaultKind};
pub use keeper::Keeper;
pub use msgs::{
    AllocateToVaultAck, AllocateToVaultRequest, RequestError, RetrieveFromVaultAck,
    RetrieveFromVaultRequest, SetOperatorParamsAck, SetOperatorParamsRequest, SetVaultParamsAck,
    SetVaultParamsRequest,
};
pub use params::{
    OperatorMetadata, OperatorParams, ParamsError, QuotingParams, VaultParams, VaultStatus,
};
pub use registry::VaultRegistry;
