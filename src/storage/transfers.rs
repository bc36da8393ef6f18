//! Transfer repository for JSON storage
//!
//! Manages loading and saving two-account transfer records to transfers.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{AccountId, TransactionId, Transfer};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transfer data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransferData {
    #[serde(default)]
    transfers: Vec<Transfer>,
}

/// Repository for transfer persistence
pub struct TransferRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transfer>>,
}

impl TransferRepository {
    /// Create a new transfer repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transfers from disk
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: TransferData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for transfer in file_data.transfers {
            data.insert(transfer.id, transfer);
        }

        Ok(())
    }

    /// Save transfers to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TransferData {
            transfers: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transfer by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transfer>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transfers, oldest date first
    pub fn get_all(&self) -> Result<Vec<Transfer>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transfers: Vec<_> = data.values().cloned().collect();
        transfers.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.as_uuid().cmp(b.id.as_uuid())));
        Ok(transfers)
    }

    /// Get all transfers leaving an account
    pub fn get_by_source(&self, account_id: AccountId) -> Result<Vec<Transfer>, TallyError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.source_account_id == account_id)
            .collect())
    }

    /// Get all transfers arriving in an account
    pub fn get_by_target(&self, account_id: AccountId) -> Result<Vec<Transfer>, TallyError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.target_account_id == account_id)
            .collect())
    }

    /// Insert or update a transfer
    pub fn upsert(&self, transfer: Transfer) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(transfer.id, transfer);
        Ok(())
    }

    /// Delete a transfer, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Remove every transfer
    pub fn delete_all(&self) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        Ok(())
    }

    /// Count transfers
    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransferRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transfers.json");
        let repo = TransferRepository::new(path);
        (temp_dir, repo)
    }

    fn test_transfer(source: AccountId, target: AccountId) -> Transfer {
        Transfer::new(
            Money::from_cents(5000),
            None,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            source,
            target,
        )
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let transfer = test_transfer(AccountId::new(), AccountId::new());
        let id = transfer.id;

        repo.upsert(transfer).unwrap();
        assert!(repo.get(id).unwrap().is_some());

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_get_by_source_and_target() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let a = AccountId::new();
        let b = AccountId::new();
        let c = AccountId::new();

        repo.upsert(test_transfer(a, b)).unwrap();
        repo.upsert(test_transfer(b, c)).unwrap();

        let from_a = repo.get_by_source(a).unwrap();
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].source_account_id, a);

        let into_c = repo.get_by_target(c).unwrap();
        assert_eq!(into_c.len(), 1);
        assert_eq!(into_c[0].target_account_id, c);

        // b appears once as source and once as target
        assert_eq!(repo.get_by_source(b).unwrap().len(), 1);
        assert_eq!(repo.get_by_target(b).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let transfer = test_transfer(AccountId::new(), AccountId::new());
        let id = transfer.id;
        repo.upsert(transfer).unwrap();
        repo.save().unwrap();

        let repo2 = TransferRepository::new(temp_dir.path().join("transfers.json"));
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }

    #[test]
    fn test_delete_all() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(test_transfer(AccountId::new(), AccountId::new()))
            .unwrap();
        repo.upsert(test_transfer(AccountId::new(), AccountId::new()))
            .unwrap();

        repo.delete_all().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
