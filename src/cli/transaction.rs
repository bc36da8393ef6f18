//! Combined transaction CLI commands
//!
//! The union view over cash flows and transfers.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_register, RegisterRow};
use crate::error::TallyResult;
use crate::services::TransactionService;
use crate::storage::Storage;

use super::account_label;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List every transaction (cash flows first, then transfers)
    List,
    /// Delete every transaction of both kinds, reversing all balance effects
    DeleteAll {
        /// Confirm the bulk delete
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::List => {
            let rows: Vec<RegisterRow> = service
                .list()?
                .into_iter()
                .map(|transaction| RegisterRow {
                    account_label: account_label(storage, &transaction),
                    transaction,
                })
                .collect();
            print!("{}", format_register(&rows, settings));
        }

        TransactionCommands::DeleteAll { yes } => {
            if !yes {
                println!("This removes every cash flow and every transfer.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.delete_all()?;
            println!("All transactions deleted; account balances restored.");
        }
    }

    Ok(())
}
