//! Balance adjustment primitives
//!
//! Every balance mutation in the ledger goes through these two functions so
//! the reversal math of all the engines stays in one auditable place. Each
//! call re-loads the account, applies the signed delta, and persists: one
//! account write per call, no sign or zero validation. Calls are not
//! idempotent; callers apply exactly one call per logical event.

use crate::error::{TallyError, TallyResult};
use crate::models::{Account, AccountId, Money};
use crate::storage::Storage;

/// Add `amount` to the account's balance and persist the account
pub fn increase(storage: &Storage, account_id: AccountId, amount: Money) -> TallyResult<Account> {
    apply(storage, account_id, amount)
}

/// Subtract `amount` from the account's balance and persist the account
pub fn decrease(storage: &Storage, account_id: AccountId, amount: Money) -> TallyResult<Account> {
    apply(storage, account_id, -amount)
}

fn apply(storage: &Storage, account_id: AccountId, delta: Money) -> TallyResult<Account> {
    let mut account = storage
        .accounts
        .get(account_id)?
        .ok_or_else(|| TallyError::unknown_account(account_id.to_string()))?;

    account.balance += delta;

    storage.accounts.upsert(account.clone())?;
    storage.accounts.save()?;

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_increase_and_decrease() {
        let (_temp_dir, storage) = create_test_storage();

        let account = Account::new("Checking", Money::from_cents(10000));
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        let updated = increase(&storage, id, Money::from_cents(2500)).unwrap();
        assert_eq!(updated.balance.cents(), 12500);

        let updated = decrease(&storage, id, Money::from_cents(500)).unwrap();
        assert_eq!(updated.balance.cents(), 12000);

        // Persisted, not just returned
        let stored = storage.accounts.get(id).unwrap().unwrap();
        assert_eq!(stored.balance.cents(), 12000);
        assert_eq!(stored.initial_balance.cents(), 10000);
    }

    #[test]
    fn test_double_apply_is_not_idempotent() {
        let (_temp_dir, storage) = create_test_storage();

        let account = Account::new("Checking", Money::zero());
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        increase(&storage, id, Money::from_cents(100)).unwrap();
        increase(&storage, id, Money::from_cents(100)).unwrap();

        let stored = storage.accounts.get(id).unwrap().unwrap();
        assert_eq!(stored.balance.cents(), 200);
    }

    #[test]
    fn test_missing_account_is_invalid_reference() {
        let (_temp_dir, storage) = create_test_storage();

        let err = increase(&storage, AccountId::new(), Money::from_cents(100)).unwrap_err();
        assert!(err.is_invalid_reference());
    }

    #[test]
    fn test_sequential_calls_see_fresh_balance() {
        let (_temp_dir, storage) = create_test_storage();

        let account = Account::new("Wallet", Money::from_cents(1000));
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        // Both legs of a self-referencing movement cancel because each call
        // re-loads the stored balance.
        decrease(&storage, id, Money::from_cents(300)).unwrap();
        increase(&storage, id, Money::from_cents(300)).unwrap();

        let stored = storage.accounts.get(id).unwrap().unwrap();
        assert_eq!(stored.balance.cents(), 1000);
    }
}
