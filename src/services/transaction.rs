//! Transaction aggregator service
//!
//! Read-only union over cash flows and transfers, plus bulk deletion that
//! delegates to each engine so every record's balance effect is reversed
//! exactly once.

use crate::error::TallyResult;
use crate::models::Transaction;
use crate::storage::Storage;

use super::cash_flow::CashFlowService;
use super::transfer::TransferService;

/// Service exposing the combined transaction view
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List every transaction: all cash flows followed by all transfers
    pub fn list(&self) -> TallyResult<Vec<Transaction>> {
        let cash_flows = CashFlowService::new(self.storage).list()?;
        let transfers = TransferService::new(self.storage).list()?;

        let mut transactions: Vec<Transaction> =
            cash_flows.into_iter().map(Transaction::CashFlow).collect();
        transactions.extend(transfers.into_iter().map(Transaction::Transfer));

        Ok(transactions)
    }

    /// Delete every transaction of both kinds
    ///
    /// Delegates to the engines' bulk deletes (cash flows first) so each
    /// engine runs its own reversal logic once per record.
    pub fn delete_all(&self) -> TallyResult<()> {
        CashFlowService::new(self.storage).delete_all()?;
        TransferService::new(self.storage).delete_all()?;
        Ok(())
    }
}
