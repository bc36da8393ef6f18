//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::TallyResult;
use crate::services::AccountService;
use crate::storage::Storage;

use super::{parse_amount, resolve_account};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Initial balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New initial balance; the current balance shifts by the difference
        #[arg(short, long)]
        balance: Option<String>,
    },
    /// Delete an account, unwinding all transactions that reference it
    Delete {
        /// Account name or ID
        account: String,
    },
    /// Delete every account and every transaction, with no unwinding
    DeleteAll {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> TallyResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create { name, balance } => {
            let initial_balance = parse_amount(&balance)?;
            let account = service.create(&name, initial_balance)?;

            println!("Created account: {}", account.name);
            println!(
                "  Initial Balance: {}",
                account
                    .initial_balance
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts, settings));
        }

        AccountCommands::Show { account } => {
            let found = resolve_account(storage, &account)?;
            print!("{}", format_account_details(&found, settings));
        }

        AccountCommands::Edit {
            account,
            name,
            balance,
        } => {
            let found = resolve_account(storage, &account)?;

            if name.is_none() && balance.is_none() {
                println!("No changes specified. Use --name and/or --balance.");
                return Ok(());
            }

            let initial_balance = balance.as_deref().map(parse_amount).transpose()?;

            match service.update(found.id, name.as_deref(), initial_balance)? {
                Some(updated) => {
                    println!("Updated account: {}", updated.name);
                    println!(
                        "  Initial Balance: {}",
                        updated
                            .initial_balance
                            .format_with_symbol(&settings.currency_symbol)
                    );
                    println!(
                        "  Current Balance: {}",
                        updated.balance.format_with_symbol(&settings.currency_symbol)
                    );
                }
                None => println!("Account not found: {}", account),
            }
        }

        AccountCommands::Delete { account } => {
            let found = resolve_account(storage, &account)?;

            if service.delete(found.id)? {
                println!("Deleted account: {}", found.name);
                println!("All transactions referencing it were unwound and removed.");
            } else {
                println!("Account not found: {}", account);
            }
        }

        AccountCommands::DeleteAll { yes } => {
            if !yes {
                println!("This removes every account and every transaction.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.delete_all()?;
            println!("Ledger wiped.");
        }
    }

    Ok(())
}
