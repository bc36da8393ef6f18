//! Service layer for tally-cli
//!
//! Business logic on top of the storage layer. Every account-balance
//! mutation funnels through the `balance` module so the create/update/delete
//! paths of all engines share one set of reversal primitives.

pub mod account;
pub mod balance;
pub mod cash_flow;
pub mod transaction;
pub mod transfer;

pub use account::AccountService;
pub use cash_flow::{CashFlowInput, CashFlowService, CashFlowUpdate};
pub use transaction::TransactionService;
pub use transfer::{TransferInput, TransferService, TransferUpdate};
