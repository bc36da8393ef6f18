//! Cash flow repository for JSON storage
//!
//! Manages loading and saving income/expense records to cash_flows.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{AccountId, CashFlow, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable cash flow data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CashFlowData {
    #[serde(default)]
    cash_flows: Vec<CashFlow>,
}

/// Repository for cash flow persistence
pub struct CashFlowRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, CashFlow>>,
}

impl CashFlowRepository {
    /// Create a new cash flow repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load cash flows from disk
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: CashFlowData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for flow in file_data.cash_flows {
            data.insert(flow.id, flow);
        }

        Ok(())
    }

    /// Save cash flows to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CashFlowData {
            cash_flows: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a cash flow by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<CashFlow>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all cash flows, oldest date first
    pub fn get_all(&self) -> Result<Vec<CashFlow>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut flows: Vec<_> = data.values().cloned().collect();
        flows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.as_uuid().cmp(b.id.as_uuid())));
        Ok(flows)
    }

    /// Get all cash flows owned by an account
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<CashFlow>, TallyError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|f| f.account_id == account_id)
            .collect())
    }

    /// Insert or update a cash flow
    pub fn upsert(&self, flow: CashFlow) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(flow.id, flow);
        Ok(())
    }

    /// Delete a cash flow, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Remove every cash flow
    pub fn delete_all(&self) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        Ok(())
    }

    /// Count cash flows
    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
