//! Transfer CLI commands
//!
//! Implements CLI commands for two-account transfers.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_register, format_transaction_details, RegisterRow};
use crate::error::{TallyError, TallyResult};
use crate::models::Transaction;
use crate::services::{TransferInput, TransferService, TransferUpdate};
use crate::storage::Storage;

use super::{account_label, parse_amount, parse_date, resolve_account, resolve_transaction_id};

/// Transfer subcommands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// Move an amount from one account to another
    Add {
        /// Source account name or ID
        from: String,
        /// Target account name or ID
        to: String,
        /// Amount (e.g., "25.00")
        amount: String,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List transfers, optionally for one account (either side)
    List {
        /// Filter by account name
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Show one transfer
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transfer; omitted fields keep their current values
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New source account (name or ID)
        #[arg(long)]
        from: Option<String>,
        /// New target account (name or ID)
        #[arg(long)]
        to: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transfer, reversing both legs
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Delete every transfer, reversing each record's legs
    DeleteAll {
        /// Confirm the bulk delete
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a transfer command
pub fn handle_transfer_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransferCommands,
) -> TallyResult<()> {
    let service = TransferService::new(storage);

    match cmd {
        TransferCommands::Add {
            from,
            to,
            amount,
            date,
            description,
        } => {
            let source = resolve_account(storage, &from)?;
            let target = resolve_account(storage, &to)?;

            let transfer = service.create(TransferInput {
                amount: parse_amount(&amount)?,
                description,
                date: parse_date(date.as_deref())?,
                source_account_id: source.id,
                target_account_id: target.id,
            })?;

            println!(
                "Transferred {} from '{}' to '{}'",
                transfer.amount.format_with_symbol(&settings.currency_symbol),
                source.name,
                target.name
            );
            println!("  ID: {}", transfer.id);
        }

        TransferCommands::List { account } => {
            let transfers = match account {
                Some(name) => service.list_by_account_name(&name)?,
                None => service.list()?,
            };

            let rows: Vec<RegisterRow> = transfers
                .into_iter()
                .map(Transaction::Transfer)
                .map(|transaction| RegisterRow {
                    account_label: account_label(storage, &transaction),
                    transaction,
                })
                .collect();
            print!("{}", format_register(&rows, settings));
        }

        TransferCommands::Show { id } => {
            let id = resolve_transaction_id(storage, &id)?;
            let transfer = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

            let transaction = Transaction::Transfer(transfer);
            let label = account_label(storage, &transaction);
            print!(
                "{}",
                format_transaction_details(&transaction, &label, settings)
            );
        }

        TransferCommands::Edit {
            id,
            amount,
            from,
            to,
            date,
            description,
        } => {
            let id = resolve_transaction_id(storage, &id)?;
            let existing = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

            let source_account_id = match from {
                Some(identifier) => resolve_account(storage, &identifier)?.id,
                None => existing.source_account_id,
            };
            let target_account_id = match to {
                Some(identifier) => resolve_account(storage, &identifier)?.id,
                None => existing.target_account_id,
            };
            let amount = match amount {
                Some(s) => parse_amount(&s)?,
                None => existing.amount,
            };
            let date = match date {
                Some(s) => parse_date(Some(&s))?,
                None => existing.date,
            };

            match service.update(
                id,
                TransferUpdate {
                    amount,
                    description,
                    date,
                    source_account_id,
                    target_account_id,
                },
            )? {
                Some(updated) => println!(
                    "Updated transfer {}: {}",
                    updated.id,
                    updated.amount.format_with_symbol(&settings.currency_symbol)
                ),
                None => println!("Transaction not found: {}", id),
            }
        }

        TransferCommands::Delete { id } => {
            let id = resolve_transaction_id(storage, &id)?;
            if service.delete(id)? {
                println!("Deleted transfer {}", id);
            } else {
                println!("Transaction not found: {}", id);
            }
        }

        TransferCommands::DeleteAll { yes } => {
            if !yes {
                println!("This removes every transfer record.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.delete_all()?;
            println!("All transfers deleted; account balances restored.");
        }
    }

    Ok(())
}
