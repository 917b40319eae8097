// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # CAIRN — Pooled-Capital Vault Ledger
//!
//! CAIRN is the vault module of a larger settlement engine: it manages
//! pooled capital ("vaults") inside the application state machine and moves
//! that capital between vault sub-accounts and a single main pooling
//! account. Like a real cairn, it is a pile of carefully stacked value —
//! knock one stone loose and the auditors come running.
//!
//! The module is deliberately thin. It does not execute blocks, it does not
//! enumerate governance, and it does not reimplement double-entry
//! accounting. It answers exactly one class of question: *is this caller
//! allowed to move this vault's funds, and does that vault even exist?* —
//! and then delegates the actual balance movement to the sub-ledger.
//!
//! ## Architecture
//!
//! - **assets** — Asset identifiers and well-known asset metadata.
//! - **config** — Module constants: the settlement asset, the main pooling
//!   account, owner-address conventions.
//! - **subaccounts** — Sub-ledger account identifiers and the transfer
//!   primitive the vault module delegates to.
//! - **vault** — The module proper: vault identifiers, parameter records,
//!   the registry, request types, and the keeper that services requests.
//!
//! ## Execution Model
//!
//! Every keeper operation runs to completion synchronously, with no
//! suspension points and no interior locking — the surrounding execution
//! engine serializes all state mutations, and `&mut self` encodes that
//! single-writer discipline in the type system. Callers must run each
//! operation inside a scoped transaction that aborts on any returned
//! error; the module itself never compensates or retries.

pub mod assets;
pub mod config;
pub mod subaccounts;
pub mod vault;
