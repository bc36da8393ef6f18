use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{
    handle_account_command, handle_flow_command, handle_transaction_command,
    handle_transfer_command, AccountCommands, FlowCommands, TransactionCommands, TransferCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Personal ledger for the command line",
    long_about = "Tally is a personal ledger that tracks accounts, income and \
                  expense records, and transfers between accounts. Account \
                  balances always reflect exactly the transactions on file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Income and expense commands
    #[command(subcommand)]
    Flow(FlowCommands),

    /// Transfer commands
    #[command(subcommand)]
    Transfer(TransferCommands),

    /// Combined transaction view
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Initialize a new ledger
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Flow(cmd)) => {
            handle_flow_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transfer(cmd)) => {
            handle_transfer_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing tally at: {}", paths.data_dir().display());
            tally::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Create your first account with 'tally account create <name> --balance <amount>'.");
        }
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        None => {
            println!("Tally - personal ledger for the command line");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally init' to set up a new ledger.");
        }
    }

    Ok(())
}
