//! # Sub-Ledger Accounts
//!
//! The sub-ledger is where balances actually live. Every participant in
//! the engine — traders, modules, vaults, the main pool — holds funds in
//! one or more *sub-accounts*, each identified by an owner address plus a
//! small account number.
//!
//! ```text
//! id.rs      — SubaccountId: owner + number, canonical string form
//! ledger.rs  — the transfer primitive (trait) + in-memory reference ledger
//! ```
//!
//! The vault module never touches balances directly: it derives the
//! relevant [`SubaccountId`]s and delegates to [`SubaccountLedger::transfer`],
//! which is the single state-mutating call in the whole retrieval path.

pub mod id;
pub mod ledger;

pub use id::{ParseSubaccountIdError, SubaccountId};
pub use ledger::{InMemoryLedger, LedgerError, SubaccountLedger};
