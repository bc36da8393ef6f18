//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::config::Settings;
use crate::models::{Account, Money};

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[Account], settings: &Settings) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {}\n",
        "Name",
        "Balance",
        "Initial",
        "Created",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {}\n",
            account.name,
            account.balance.format_with_symbol(&settings.currency_symbol),
            account
                .initial_balance
                .format_with_symbol(&settings.currency_symbol),
            account.created_at.format(&settings.date_format),
            name_width = name_width,
        ));
    }

    let total_balance: Money = accounts.iter().map(|a| a.balance).sum();

    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        total_balance.format_with_symbol(&settings.currency_symbol),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:              {}\n", account.id));
    output.push_str(&format!(
        "  Initial Balance: {}\n",
        account
            .initial_balance
            .format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "  Current Balance: {}\n",
        account.balance.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "  Created:         {}\n",
        account.created_at.format(&settings.date_format)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_account_list() {
        let accounts = vec![
            Account::new("Checking", Money::from_cents(100000)),
            Account::new("Savings", Money::from_cents(500000)),
        ];

        let output = format_account_list(&accounts, &Settings::default());
        assert!(output.contains("Checking"));
        assert!(output.contains("Savings"));
        assert!(output.contains("$1000.00"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$6000.00"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_account_list(&[], &Settings::default());
        assert!(output.contains("No accounts found"));
    }

    #[test]
    fn test_format_account_details() {
        let account = Account::new("My Account", Money::from_cents(2500));
        let output = format_account_details(&account, &Settings::default());

        assert!(output.contains("My Account"));
        assert!(output.contains("Initial Balance: $25.00"));
        assert!(output.contains("Current Balance: $25.00"));
    }

    #[test]
    fn test_respects_currency_symbol() {
        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();

        let account = Account::new("Euros", Money::from_cents(1000));
        let output = format_account_details(&account, &settings);
        assert!(output.contains("€10.00"));
    }
}
