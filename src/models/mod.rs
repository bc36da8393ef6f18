//! Core data models for tally-cli
//!
//! This module contains the data structures that represent the ledger
//! domain: accounts, cash flows, and transfers.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use ids::{AccountId, TransactionId};
pub use money::Money;
pub use transaction::{CashFlow, CashFlowKind, Transaction, TransactionType, Transfer};
