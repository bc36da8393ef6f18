//! Cash flow service
//!
//! Business logic for single-account income/expense records. Every mutation
//! keeps the owning account's balance in step: creating applies the record's
//! effect, deleting reverses it, and updating reverses the old effect before
//! applying the new one.

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{AccountId, CashFlow, CashFlowKind, Money, TransactionId};
use crate::storage::Storage;

use super::balance;

/// Service for cash flow management
pub struct CashFlowService<'a> {
    storage: &'a Storage,
}

/// Input for creating a cash flow record
#[derive(Debug, Clone)]
pub struct CashFlowInput {
    pub amount: Money,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    pub kind: CashFlowKind,
    pub account_id: AccountId,
}

/// Input for updating a cash flow record
///
/// Amount, date, and account are always rewritten; the description only when
/// a non-empty one is supplied, the kind only when one is supplied.
#[derive(Debug, Clone)]
pub struct CashFlowUpdate {
    pub amount: Money,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    pub kind: Option<CashFlowKind>,
    pub account_id: AccountId,
}

impl<'a> CashFlowService<'a> {
    /// Create a new cash flow service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new income or expense
    pub fn create(&self, input: CashFlowInput) -> TallyResult<CashFlow> {
        let account = self
            .storage
            .accounts
            .get(input.account_id)?
            .ok_or_else(|| TallyError::unknown_account(input.account_id.to_string()))?;

        let flow = CashFlow::new(
            input.amount,
            input.description,
            input.date,
            input.kind,
            account.id,
        );
        flow.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        // Apply the balance effect before persisting the record
        match flow.kind {
            CashFlowKind::Income => balance::increase(self.storage, account.id, flow.amount)?,
            CashFlowKind::Expense => balance::decrease(self.storage, account.id, flow.amount)?,
        };

        self.storage.cash_flows.upsert(flow.clone())?;
        self.storage.cash_flows.save()?;

        self.storage.log_create(
            EntityType::CashFlow,
            flow.id.to_string(),
            Some(format!("{} {} on {}", flow.kind, flow.amount, account.name)),
            &flow,
        )?;

        Ok(flow)
    }

    /// Get a cash flow by ID
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<CashFlow>> {
        self.storage.cash_flows.get(id)
    }

    /// List all cash flows
    pub fn list(&self) -> TallyResult<Vec<CashFlow>> {
        self.storage.cash_flows.get_all()
    }

    /// List the cash flows owned by the named account
    ///
    /// Unknown names are an invalid reference, not an empty list.
    pub fn list_by_account_name(&self, account_name: &str) -> TallyResult<Vec<CashFlow>> {
        let account = self
            .storage
            .accounts
            .get_by_name(account_name)?
            .ok_or_else(|| TallyError::unknown_account(account_name))?;

        self.storage.cash_flows.get_by_account(account.id)
    }

    /// Update a cash flow record
    ///
    /// Returns `Ok(None)` when no record has this id. The new account is
    /// resolved before the old effect is reversed, so a bad reference fails
    /// the whole update without touching any balance.
    pub fn update(
        &self,
        id: TransactionId,
        update: CashFlowUpdate,
    ) -> TallyResult<Option<CashFlow>> {
        let Some(mut flow) = self.storage.cash_flows.get(id)? else {
            return Ok(None);
        };

        // Fail fast on anything invalid before the reversal below, so a bad
        // update cannot leave the balance half-reversed.
        let account = self
            .storage
            .accounts
            .get(update.account_id)?
            .ok_or_else(|| TallyError::unknown_account(update.account_id.to_string()))?;

        if !update.amount.is_positive() {
            return Err(TallyError::Validation(format!(
                "Amount must be positive, got {}",
                update.amount
            )));
        }

        let before = flow.clone();

        // Undo the old effect on the old account
        match flow.kind {
            CashFlowKind::Income => balance::decrease(self.storage, flow.account_id, flow.amount)?,
            CashFlowKind::Expense => balance::increase(self.storage, flow.account_id, flow.amount)?,
        };

        flow.amount = update.amount;
        if let Some(description) = update.description {
            if !description.is_empty() {
                flow.description = Some(description);
            }
        }
        flow.date = update.date;
        if let Some(kind) = update.kind {
            flow.kind = kind;
        }
        flow.account_id = account.id;

        // Apply the new effect with the (possibly changed) kind and account
        match flow.kind {
            CashFlowKind::Income => balance::increase(self.storage, flow.account_id, flow.amount)?,
            CashFlowKind::Expense => balance::decrease(self.storage, flow.account_id, flow.amount)?,
        };

        self.storage.cash_flows.upsert(flow.clone())?;
        self.storage.cash_flows.save()?;

        let mut changes = Vec::new();
        if before.amount != flow.amount {
            changes.push(format!("amount: {} -> {}", before.amount, flow.amount));
        }
        if before.kind != flow.kind {
            changes.push(format!("kind: {} -> {}", before.kind, flow.kind));
        }
        if before.account_id != flow.account_id {
            changes.push(format!(
                "account: {} -> {}",
                before.account_id, flow.account_id
            ));
        }
        if before.date != flow.date {
            changes.push(format!("date: {} -> {}", before.date, flow.date));
        }
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::CashFlow,
            flow.id.to_string(),
            Some(format!("{} {}", flow.kind, flow.amount)),
            &before,
            &flow,
            diff,
        )?;

        Ok(Some(flow))
    }

    /// Delete a cash flow record
    ///
    /// Returns false when no record has this id; otherwise reverses the
    /// record's balance effect and removes it.
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let Some(flow) = self.storage.cash_flows.get(id)? else {
            return Ok(false);
        };

        match flow.kind {
            CashFlowKind::Income => balance::decrease(self.storage, flow.account_id, flow.amount)?,
            CashFlowKind::Expense => balance::increase(self.storage, flow.account_id, flow.amount)?,
        };

        self.storage.cash_flows.delete(id)?;
        self.storage.cash_flows.save()?;

        self.storage.log_delete(
            EntityType::CashFlow,
            flow.id.to_string(),
            Some(format!("{} {}", flow.kind, flow.amount)),
            &flow,
        )?;

        Ok(true)
    }

    /// Delete every cash flow record
    ///
    /// First reverses every record's balance effect, then clears the store
    /// in one sweep.
    pub fn delete_all(&self) -> TallyResult<()> {
        for flow in self.storage.cash_flows.get_all()? {
            match flow.kind {
                CashFlowKind::Income => {
                    balance::decrease(self.storage, flow.account_id, flow.amount)?
                }
                CashFlowKind::Expense => {
                    balance::increase(self.storage, flow.account_id, flow.amount)?
                }
            };
        }

        self.storage.cash_flows.delete_all()?;
        self.storage.cash_flows.save()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::Account;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn setup_account(storage: &Storage, name: &str, cents: i64) -> AccountId {
        let account = Account::new(name, Money::from_cents(cents));
        let id = account.id;
        storage.accounts.upsert(account).unwrap();
        storage.accounts.save().unwrap();
        id
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn input(kind: CashFlowKind, cents: i64, account_id: AccountId) -> CashFlowInput {
        CashFlowInput {
            amount: Money::from_cents(cents),
            description: None,
            date: test_date(),
            kind,
            account_id,
        }
    }

    fn balance_of(storage: &Storage, id: AccountId) -> i64 {
        storage.accounts.get(id).unwrap().unwrap().balance.cents()
    }

    #[test]
    fn test_income_increases_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 10000);
        let service = CashFlowService::new(&storage);

        service
            .create(input(CashFlowKind::Income, 10000, account_id))
            .unwrap();

        assert_eq!(balance_of(&storage, account_id), 20000);
    }

    #[test]
    fn test_expense_decreases_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 10000);
        let service = CashFlowService::new(&storage);

        service
            .create(input(CashFlowKind::Expense, 2500, account_id))
            .unwrap();

        assert_eq!(balance_of(&storage, account_id), 7500);
    }

    #[test]
    fn test_create_unknown_account_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashFlowService::new(&storage);

        let err = service
            .create(input(CashFlowKind::Income, 100, AccountId::new()))
            .unwrap_err();
        assert!(err.is_invalid_reference());
        assert_eq!(storage.cash_flows.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 10000);
        let service = CashFlowService::new(&storage);

        let err = service
            .create(input(CashFlowKind::Income, 0, account_id))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance_of(&storage, account_id), 10000);
    }

    #[test]
    fn test_create_then_delete_is_balance_noop() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 10000);
        let service = CashFlowService::new(&storage);

        let flow = service
            .create(input(CashFlowKind::Income, 10000, account_id))
            .unwrap();
        assert_eq!(balance_of(&storage, account_id), 20000);

        assert!(service.delete(flow.id).unwrap());
        assert_eq!(balance_of(&storage, account_id), 10000);
        assert!(service.get(flow.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_absent_returns_false() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashFlowService::new(&storage);

        assert!(!service.delete(TransactionId::new()).unwrap());
    }

    #[test]
    fn test_update_amount_shifts_balance_by_delta() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 0);
        let service = CashFlowService::new(&storage);

        let flow = service
            .create(input(CashFlowKind::Income, 10000, account_id))
            .unwrap();
        assert_eq!(balance_of(&storage, account_id), 10000);

        let updated = service
            .update(
                flow.id,
                CashFlowUpdate {
                    amount: Money::from_cents(15000),
                    description: None,
                    date: test_date(),
                    kind: None,
                    account_id,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.amount.cents(), 15000);
        assert_eq!(balance_of(&storage, account_id), 15000);
    }

    #[test]
    fn test_update_kind_flips_effect() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 0);
        let service = CashFlowService::new(&storage);

        let flow = service
            .create(input(CashFlowKind::Income, 5000, account_id))
            .unwrap();
        assert_eq!(balance_of(&storage, account_id), 5000);

        service
            .update(
                flow.id,
                CashFlowUpdate {
                    amount: Money::from_cents(5000),
                    description: None,
                    date: test_date(),
                    kind: Some(CashFlowKind::Expense),
                    account_id,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(balance_of(&storage, account_id), -5000);
    }

    #[test]
    fn test_update_moves_effect_to_new_account() {
        let (_temp_dir, storage) = create_test_storage();
        let first = setup_account(&storage, "First", 0);
        let second = setup_account(&storage, "Second", 0);
        let service = CashFlowService::new(&storage);

        let flow = service.create(input(CashFlowKind::Income, 3000, first)).unwrap();
        assert_eq!(balance_of(&storage, first), 3000);

        let updated = service
            .update(
                flow.id,
                CashFlowUpdate {
                    amount: Money::from_cents(3000),
                    description: None,
                    date: test_date(),
                    kind: None,
                    account_id: second,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.account_id, second);
        assert_eq!(balance_of(&storage, first), 0);
        assert_eq!(balance_of(&storage, second), 3000);
    }

    #[test]
    fn test_update_absent_returns_none() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 0);
        let service = CashFlowService::new(&storage);

        let result = service
            .update(
                TransactionId::new(),
                CashFlowUpdate {
                    amount: Money::from_cents(100),
                    description: None,
                    date: test_date(),
                    kind: None,
                    account_id,
                },
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_bad_reference_leaves_balance_untouched() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 0);
        let service = CashFlowService::new(&storage);

        let flow = service
            .create(input(CashFlowKind::Income, 4000, account_id))
            .unwrap();

        let err = service
            .update(
                flow.id,
                CashFlowUpdate {
                    amount: Money::from_cents(9000),
                    description: None,
                    date: test_date(),
                    kind: None,
                    account_id: AccountId::new(),
                },
            )
            .unwrap_err();

        // The reference fails before any reversal, so the old effect stands
        assert!(err.is_invalid_reference());
        assert_eq!(balance_of(&storage, account_id), 4000);
        let stored = service.get(flow.id).unwrap().unwrap();
        assert_eq!(stored.amount.cents(), 4000);
    }

    #[test]
    fn test_update_keeps_description_when_update_is_empty() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 0);
        let service = CashFlowService::new(&storage);

        let flow = service
            .create(CashFlowInput {
                amount: Money::from_cents(1000),
                description: Some("paycheck".into()),
                date: test_date(),
                kind: CashFlowKind::Income,
                account_id,
            })
            .unwrap();

        let updated = service
            .update(
                flow.id,
                CashFlowUpdate {
                    amount: Money::from_cents(1000),
                    description: Some(String::new()),
                    date: test_date(),
                    kind: None,
                    account_id,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("paycheck"));
    }

    #[test]
    fn test_list_by_account_name() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = setup_account(&storage, "Checking", 0);
        let savings = setup_account(&storage, "Savings", 0);
        let service = CashFlowService::new(&storage);

        service.create(input(CashFlowKind::Income, 100, checking)).unwrap();
        service.create(input(CashFlowKind::Expense, 200, checking)).unwrap();
        service.create(input(CashFlowKind::Income, 300, savings)).unwrap();

        let flows = service.list_by_account_name("checking").unwrap();
        assert_eq!(flows.len(), 2);
    }

    #[test]
    fn test_list_by_unknown_account_name_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashFlowService::new(&storage);

        let err = service.list_by_account_name("ghost").unwrap_err();
        assert!(err.is_invalid_reference());
        assert_eq!(err.to_string(), "Unknown account: ghost");
    }

    #[test]
    fn test_delete_all_reverses_every_record() {
        let (_temp_dir, storage) = create_test_storage();
        let account_id = setup_account(&storage, "Checking", 5000);
        let service = CashFlowService::new(&storage);

        service.create(input(CashFlowKind::Income, 2000, account_id)).unwrap();
        service.create(input(CashFlowKind::Expense, 500, account_id)).unwrap();
        assert_eq!(balance_of(&storage, account_id), 6500);

        service.delete_all().unwrap();

        assert_eq!(storage.cash_flows.count().unwrap(), 0);
        assert_eq!(balance_of(&storage, account_id), 5000);
    }
}
