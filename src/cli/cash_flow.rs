//! Cash flow CLI commands
//!
//! Implements CLI commands for income and expense records.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_register, format_transaction_details, RegisterRow};
use crate::error::{TallyError, TallyResult};
use crate::models::{CashFlowKind, Transaction};
use crate::services::{CashFlowInput, CashFlowService, CashFlowUpdate};
use crate::storage::Storage;

use super::{account_label, parse_amount, parse_date, resolve_account, resolve_transaction_id};

/// Cash flow subcommands
#[derive(Subcommand)]
pub enum FlowCommands {
    /// Record an income or expense
    Add {
        /// "income" or "expense"
        kind: String,
        /// Account name or ID
        account: String,
        /// Amount (e.g., "25.00")
        amount: String,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List cash flows, optionally for one account
    List {
        /// Filter by account name
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Show one cash flow
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a cash flow; omitted fields keep their current values
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New owning account (name or ID)
        #[arg(long)]
        account: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New kind ("income" or "expense")
        #[arg(short, long)]
        kind: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a cash flow, reversing its balance effect
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Delete every cash flow, reversing each record's balance effect
    DeleteAll {
        /// Confirm the bulk delete
        #[arg(long)]
        yes: bool,
    },
}

fn parse_kind(s: &str) -> TallyResult<CashFlowKind> {
    CashFlowKind::parse(s).ok_or_else(|| {
        TallyError::Validation(format!(
            "Invalid kind: '{}'. Valid kinds: income, expense",
            s
        ))
    })
}

/// Handle a cash flow command
pub fn handle_flow_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FlowCommands,
) -> TallyResult<()> {
    let service = CashFlowService::new(storage);

    match cmd {
        FlowCommands::Add {
            kind,
            account,
            amount,
            date,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let account = resolve_account(storage, &account)?;

            let flow = service.create(CashFlowInput {
                amount: parse_amount(&amount)?,
                description,
                date: parse_date(date.as_deref())?,
                kind,
                account_id: account.id,
            })?;

            println!(
                "Recorded {} of {} on '{}'",
                flow.kind,
                flow.amount.format_with_symbol(&settings.currency_symbol),
                account.name
            );
            println!("  ID: {}", flow.id);
        }

        FlowCommands::List { account } => {
            let flows = match account {
                Some(name) => service.list_by_account_name(&name)?,
                None => service.list()?,
            };

            let rows: Vec<RegisterRow> = flows
                .into_iter()
                .map(Transaction::CashFlow)
                .map(|transaction| RegisterRow {
                    account_label: account_label(storage, &transaction),
                    transaction,
                })
                .collect();
            print!("{}", format_register(&rows, settings));
        }

        FlowCommands::Show { id } => {
            let id = resolve_transaction_id(storage, &id)?;
            let flow = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

            let transaction = Transaction::CashFlow(flow);
            let label = account_label(storage, &transaction);
            print!(
                "{}",
                format_transaction_details(&transaction, &label, settings)
            );
        }

        FlowCommands::Edit {
            id,
            amount,
            account,
            date,
            kind,
            description,
        } => {
            let id = resolve_transaction_id(storage, &id)?;
            let existing = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

            let account_id = match account {
                Some(identifier) => resolve_account(storage, &identifier)?.id,
                None => existing.account_id,
            };
            let amount = match amount {
                Some(s) => parse_amount(&s)?,
                None => existing.amount,
            };
            let date = match date {
                Some(s) => parse_date(Some(&s))?,
                None => existing.date,
            };
            let kind = kind.as_deref().map(parse_kind).transpose()?;

            match service.update(
                id,
                CashFlowUpdate {
                    amount,
                    description,
                    date,
                    kind,
                    account_id,
                },
            )? {
                Some(updated) => println!(
                    "Updated cash flow {}: {} {}",
                    updated.id,
                    updated.kind,
                    updated.amount.format_with_symbol(&settings.currency_symbol)
                ),
                None => println!("Transaction not found: {}", id),
            }
        }

        FlowCommands::Delete { id } => {
            let id = resolve_transaction_id(storage, &id)?;
            if service.delete(id)? {
                println!("Deleted cash flow {}", id);
            } else {
                println!("Transaction not found: {}", id);
            }
        }

        FlowCommands::DeleteAll { yes } => {
            if !yes {
                println!("This removes every cash flow record.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.delete_all()?;
            println!("All cash flows deleted; account balances restored.");
        }
    }

    Ok(())
}
