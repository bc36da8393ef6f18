//! Account service
//!
//! Business logic for account lifecycle management. Deleting an account
//! unwinds every transaction that references it, replaying the inverse
//! balance effect on all involved accounts, before removing the records and
//! the account itself.

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Account, AccountId, CashFlowKind, Money};
use crate::storage::Storage;

use super::balance;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account; its balance starts at the initial balance
    pub fn create(&self, name: &str, initial_balance: Money) -> TallyResult<Account> {
        let account = Account::new(name.trim(), initial_balance);
        account
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> TallyResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> TallyResult<Option<Account>> {
        self.storage.accounts.get_by_name(name)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Get all accounts
    pub fn list(&self) -> TallyResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    /// Update an account's name and/or initial balance
    ///
    /// Returns `Ok(None)` when no account has this id. Changing the initial
    /// balance shifts the current balance by exactly the difference: a pure
    /// capital injection or withdrawal, independent of transaction history.
    pub fn update(
        &self,
        id: AccountId,
        name: Option<&str>,
        initial_balance: Option<Money>,
    ) -> TallyResult<Option<Account>> {
        let Some(mut account) = self.storage.accounts.get(id)? else {
            return Ok(None);
        };

        let before = account.clone();

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if new_name != account.name {
                account.name = new_name.to_string();
            }
        }

        if let Some(new_initial) = initial_balance {
            if new_initial != account.initial_balance {
                account.balance += new_initial - account.initial_balance;
                account.initial_balance = new_initial;
            }
        }

        account
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        let mut changes = Vec::new();
        if before.name != account.name {
            changes.push(format!("name: {} -> {}", before.name, account.name));
        }
        if before.initial_balance != account.initial_balance {
            changes.push(format!(
                "initial balance: {} -> {}",
                before.initial_balance, account.initial_balance
            ));
        }
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
            diff,
        )?;

        Ok(Some(account))
    }

    /// Delete an account and unwind everything that references it
    ///
    /// Returns false when no account has this id. Otherwise every owned cash
    /// flow is reversed and removed, every transfer touching the account is
    /// reversed on both legs and removed, and finally the account row goes.
    pub fn delete(&self, id: AccountId) -> TallyResult<bool> {
        let Some(account) = self.storage.accounts.get(id)? else {
            return Ok(false);
        };

        for flow in self.storage.cash_flows.get_by_account(id)? {
            match flow.kind {
                CashFlowKind::Income => {
                    balance::decrease(self.storage, flow.account_id, flow.amount)?
                }
                CashFlowKind::Expense => {
                    balance::increase(self.storage, flow.account_id, flow.amount)?
                }
            };
            self.storage.cash_flows.delete(flow.id)?;

            self.storage.log_delete(
                EntityType::CashFlow,
                flow.id.to_string(),
                Some(format!("{} {}", flow.kind, flow.amount)),
                &flow,
            )?;
        }
        self.storage.cash_flows.save()?;

        // Union of both sides; a transfer is unwound at most once even when
        // the account is source and target.
        let mut transfers = self.storage.transfers.get_by_source(id)?;
        for transfer in self.storage.transfers.get_by_target(id)? {
            if !transfers.iter().any(|t| t.id == transfer.id) {
                transfers.push(transfer);
            }
        }

        for transfer in transfers {
            balance::increase(self.storage, transfer.source_account_id, transfer.amount)?;
            balance::decrease(self.storage, transfer.target_account_id, transfer.amount)?;
            self.storage.transfers.delete(transfer.id)?;

            self.storage.log_delete(
                EntityType::Transfer,
                transfer.id.to_string(),
                Some(format!("Transfer {}", transfer.amount)),
                &transfer,
            )?;
        }
        self.storage.transfers.save()?;

        self.storage.accounts.delete(id)?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(true)
    }

    /// Wipe the whole ledger: all cash flows, all transfers, all accounts
    ///
    /// No balance reversal; every referencing record and every account row
    /// is removed outright.
    pub fn delete_all(&self) -> TallyResult<()> {
        self.storage.cash_flows.delete_all()?;
        self.storage.cash_flows.save()?;

        self.storage.transfers.delete_all()?;
        self.storage.transfers.save()?;

        self.storage.accounts.delete_all()?;
        self.storage.accounts.save()?;

        Ok(())
    }
}
