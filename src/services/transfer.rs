//! Transfer service
//!
//! Business logic for two-account transfers. Creating a transfer moves the
//! amount off the source and onto the target; deleting reverses both legs;
//! updating reverses the old legs before applying the new ones, so
//! retargeting moves the economic effect cleanly between accounts.

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Account, AccountId, Money, TransactionId, Transfer};
use crate::storage::Storage;

use super::balance;

/// Service for transfer management
pub struct TransferService<'a> {
    storage: &'a Storage,
}

/// Input for creating a transfer record
#[derive(Debug, Clone)]
pub struct TransferInput {
    pub amount: Money,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    pub source_account_id: AccountId,
    pub target_account_id: AccountId,
}

/// Input for updating a transfer record
///
/// Amount, date, and both accounts are always rewritten; the description
/// only when a non-empty one is supplied.
#[derive(Debug, Clone)]
pub struct TransferUpdate {
    pub amount: Money,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    pub source_account_id: AccountId,
    pub target_account_id: AccountId,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Resolve both ends of a transfer, failing with the missing side.
    /// The source is checked first.
    fn resolve_accounts(
        &self,
        source_id: AccountId,
        target_id: AccountId,
    ) -> TallyResult<(Account, Account)> {
        let source = self
            .storage
            .accounts
            .get(source_id)?
            .ok_or_else(|| TallyError::unknown_source_account(source_id.to_string()))?;

        let target = self
            .storage
            .accounts
            .get(target_id)?
            .ok_or_else(|| TallyError::unknown_target_account(target_id.to_string()))?;

        Ok((source, target))
    }

    /// Record a new transfer between two accounts
    pub fn create(&self, input: TransferInput) -> TallyResult<Transfer> {
        let (source, target) =
            self.resolve_accounts(input.source_account_id, input.target_account_id)?;

        let transfer = Transfer::new(
            input.amount,
            input.description,
            input.date,
            source.id,
            target.id,
        );
        transfer
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        balance::decrease(self.storage, source.id, transfer.amount)?;
        balance::increase(self.storage, target.id, transfer.amount)?;

        self.storage.transfers.upsert(transfer.clone())?;
        self.storage.transfers.save()?;

        self.storage.log_create(
            EntityType::Transfer,
            transfer.id.to_string(),
            Some(format!(
                "{} from {} to {}",
                transfer.amount, source.name, target.name
            )),
            &transfer,
        )?;

        Ok(transfer)
    }

    /// Get a transfer by ID
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transfer>> {
        self.storage.transfers.get(id)
    }

    /// List all transfers
    pub fn list(&self) -> TallyResult<Vec<Transfer>> {
        self.storage.transfers.get_all()
    }

    /// List the transfers touching the named account, source matches first
    ///
    /// Unknown names are an invalid reference, not an empty list.
    pub fn list_by_account_name(&self, account_name: &str) -> TallyResult<Vec<Transfer>> {
        let account = self
            .storage
            .accounts
            .get_by_name(account_name)?
            .ok_or_else(|| TallyError::unknown_account(account_name))?;

        let mut transfers = self.storage.transfers.get_by_source(account.id)?;
        for transfer in self.storage.transfers.get_by_target(account.id)? {
            if !transfers.iter().any(|t| t.id == transfer.id) {
                transfers.push(transfer);
            }
        }

        Ok(transfers)
    }

    /// Update a transfer record
    ///
    /// Returns `Ok(None)` when no record has this id. Both new accounts are
    /// resolved before the old legs are reversed, so a bad reference fails
    /// the whole update without touching any balance.
    pub fn update(&self, id: TransactionId, update: TransferUpdate) -> TallyResult<Option<Transfer>> {
        let Some(mut transfer) = self.storage.transfers.get(id)? else {
            return Ok(None);
        };

        // Fail fast on anything invalid before the reversal below, so a bad
        // update cannot leave the balances half-reversed.
        let (source, target) =
            self.resolve_accounts(update.source_account_id, update.target_account_id)?;

        if !update.amount.is_positive() {
            return Err(TallyError::Validation(format!(
                "Amount must be positive, got {}",
                update.amount
            )));
        }

        let before = transfer.clone();

        // Undo both old legs
        balance::increase(self.storage, transfer.source_account_id, transfer.amount)?;
        balance::decrease(self.storage, transfer.target_account_id, transfer.amount)?;

        transfer.amount = update.amount;
        if let Some(description) = update.description {
            if !description.is_empty() {
                transfer.description = Some(description);
            }
        }
        transfer.date = update.date;
        transfer.source_account_id = source.id;
        transfer.target_account_id = target.id;

        // Apply both new legs
        balance::decrease(self.storage, transfer.source_account_id, transfer.amount)?;
        balance::increase(self.storage, transfer.target_account_id, transfer.amount)?;

        self.storage.transfers.upsert(transfer.clone())?;
        self.storage.transfers.save()?;

        let mut changes = Vec::new();
        if before.amount != transfer.amount {
            changes.push(format!("amount: {} -> {}", before.amount, transfer.amount));
        }
        if before.source_account_id != transfer.source_account_id {
            changes.push(format!(
                "source: {} -> {}",
                before.source_account_id, transfer.source_account_id
            ));
        }
        if before.target_account_id != transfer.target_account_id {
            changes.push(format!(
                "target: {} -> {}",
                before.target_account_id, transfer.target_account_id
            ));
        }
        if before.date != transfer.date {
            changes.push(format!("date: {} -> {}", before.date, transfer.date));
        }
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Transfer,
            transfer.id.to_string(),
            Some(format!("Transfer {}", transfer.amount)),
            &before,
            &transfer,
            diff,
        )?;

        Ok(Some(transfer))
    }

    /// Delete a transfer record
    ///
    /// Returns false when no record has this id; otherwise reverses both
    /// legs and removes the record.
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let Some(transfer) = self.storage.transfers.get(id)? else {
            return Ok(false);
        };

        balance::increase(self.storage, transfer.source_account_id, transfer.amount)?;
        balance::decrease(self.storage, transfer.target_account_id, transfer.amount)?;

        self.storage.transfers.delete(id)?;
        self.storage.transfers.save()?;

        self.storage.log_delete(
            EntityType::Transfer,
            transfer.id.to_string(),
            Some(format!("Transfer {}", transfer.amount)),
            &transfer,
        )?;

        Ok(true)
    }

    /// Delete every transfer record
    ///
    /// First reverses every record's legs, then clears the store in one
    /// sweep.
    pub fn delete_all(&self) -> TallyResult<()> {
        for transfer in self.storage.transfers.get_all()? {
            balance::increase(self.storage, transfer.source_account_id, transfer.amount)?;
            balance::decrease(self.storage, transfer.target_account_id, transfer.amount)?;
        }

        self.storage.transfers.delete_all()?;
        self.storage.transfers.save()?;

        Ok(())
    }
}
