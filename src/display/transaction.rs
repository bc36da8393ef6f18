//! Transaction display formatting
//!
//! Register and detail views for cash flows and transfers. Account
//! references are resolved to display labels by the caller so the formatter
//! stays independent of storage.

use crate::config::Settings;
use crate::models::Transaction;

/// One row of the transaction register, with the account reference(s)
/// already resolved to a label ("Checking" or "Checking -> Savings")
#[derive(Debug, Clone)]
pub struct RegisterRow {
    pub transaction: Transaction,
    pub account_label: String,
}

/// Format a single register row
pub fn format_register_row(row: &RegisterRow, settings: &Settings) -> String {
    let txn = &row.transaction;
    format!(
        "{}  {}  {:<8}  {:>12}  {:<24}  {}",
        txn.id(),
        txn.date().format("%Y-%m-%d"),
        txn.transaction_type().to_string(),
        txn.amount().format_with_symbol(&settings.currency_symbol),
        truncate(&row.account_label, 24),
        txn.description().unwrap_or(""),
    )
}

/// Format a list of transactions as a register
pub fn format_register(rows: &[RegisterRow], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<8}  {:>12}  {:<24}  {}\n",
        "ID", "Date", "Type", "Amount", "Account", "Description"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for row in rows {
        output.push_str(&format_register_row(row, settings));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    account_label: &str,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!("  Type:    {}\n", txn.transaction_type()));
    output.push_str(&format!("  Date:    {}\n", txn.date().format("%Y-%m-%d")));
    output.push_str(&format!(
        "  Amount:  {}\n",
        txn.amount().format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("  Account: {}\n", account_label));

    if let Some(description) = txn.description() {
        output.push_str(&format!("  Note:    {}\n", description));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
