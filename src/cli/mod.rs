//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers parse and
//! resolve user input (amounts, dates, account names), call one service
//! operation, and print the result.

pub mod account;
pub mod cash_flow;
pub mod transaction;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use cash_flow::{handle_flow_command, FlowCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfer_command, TransferCommands};

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::{Account, Money, Transaction, TransactionId};
use crate::services::AccountService;
use crate::storage::Storage;

/// Parse a user-supplied amount
pub(crate) fn parse_amount(s: &str) -> TallyResult<Money> {
    Money::parse(s).map_err(|e| {
        TallyError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1000.00' or '1000'. {}",
            s, e
        ))
    })
}

/// Parse a user-supplied date (YYYY-MM-DD); defaults to today
pub(crate) fn parse_date(s: Option<&str>) -> TallyResult<NaiveDate> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            TallyError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD.", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Resolve an account by name or id string, failing with "not found"
pub(crate) fn resolve_account(storage: &Storage, identifier: &str) -> TallyResult<Account> {
    AccountService::new(storage)
        .find(identifier)?
        .ok_or_else(|| TallyError::account_not_found(identifier))
}

/// Resolve a transaction id string: a full UUID (with or without the
/// "txn-" prefix), or the short display form matched against the stored
/// records by prefix.
pub(crate) fn resolve_transaction_id(storage: &Storage, s: &str) -> TallyResult<TransactionId> {
    if let Ok(id) = s.parse::<TransactionId>() {
        return Ok(id);
    }

    let needle = s.strip_prefix("txn-").unwrap_or(s).to_lowercase();
    if needle.is_empty() {
        return Err(TallyError::Validation(format!(
            "Invalid transaction id: {}",
            s
        )));
    }

    let mut matches: Vec<TransactionId> = Vec::new();
    for flow in storage.cash_flows.get_all()? {
        if flow.id.as_uuid().to_string().starts_with(&needle) {
            matches.push(flow.id);
        }
    }
    for transfer in storage.transfers.get_all()? {
        if transfer.id.as_uuid().to_string().starts_with(&needle) {
            matches.push(transfer.id);
        }
    }

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(TallyError::transaction_not_found(s)),
        _ => Err(TallyError::Validation(format!(
            "Transaction id '{}' is ambiguous; use the full id",
            s
        ))),
    }
}

/// Build the register label for a transaction's account reference(s)
pub(crate) fn account_label(storage: &Storage, transaction: &Transaction) -> String {
    let name_of = |id: crate::models::AccountId| match storage.accounts.get(id) {
        Ok(Some(account)) => account.name,
        _ => id.to_string(),
    };

    match transaction {
        Transaction::CashFlow(flow) => name_of(flow.account_id),
        Transaction::Transfer(transfer) => format!(
            "{} -> {}",
            name_of(transfer.source_account_id),
            name_of(transfer.target_account_id)
        ),
    }
}
