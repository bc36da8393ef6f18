//! End-to-end CLI tests
//!
//! Drives the `tally` binary against a temp data directory and checks that
//! balances track the recorded transactions.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CLI_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn init_then_create_and_list_accounts() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    tally(&dir)
        .args(["account", "create", "Checking", "--balance", "100.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: Checking"));

    tally(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"))
        .stdout(predicate::str::contains("$100.00"));
}

#[test]
fn income_and_expense_move_the_balance() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["account", "create", "Checking", "--balance", "100.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["flow", "add", "income", "Checking", "50.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded Income of $50.00"));

    tally(&dir)
        .args(["account", "show", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $150.00"));

    tally(&dir)
        .args(["flow", "add", "expense", "Checking", "30.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["account", "show", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $120.00"))
        .stdout(predicate::str::contains("Initial Balance: $100.00"));
}

#[test]
fn transfer_moves_amount_between_accounts() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["account", "create", "Checking", "--balance", "100.00"])
        .assert()
        .success();
    tally(&dir)
        .args(["account", "create", "Savings", "--balance", "20.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["transfer", "add", "Checking", "Savings", "50.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transferred $50.00 from 'Checking' to 'Savings'",
        ));

    tally(&dir)
        .args(["account", "show", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $50.00"));

    tally(&dir)
        .args(["account", "show", "Savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $70.00"));
}

#[test]
fn deleting_an_account_unwinds_its_transfers() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["account", "create", "Doomed", "--balance", "100.00"])
        .assert()
        .success();
    tally(&dir)
        .args(["account", "create", "Other", "--balance", "10.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["transfer", "add", "Doomed", "Other", "30.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["account", "delete", "Doomed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted account: Doomed"));

    // The counterparty's balance is back where it started
    tally(&dir)
        .args(["account", "show", "Other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $10.00"));

    // And the deleted account is gone
    tally(&dir)
        .args(["account", "show", "Doomed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: Doomed"));
}

#[test]
fn listing_flows_for_unknown_account_fails() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["flow", "list", "--account", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown account: ghost"));
}

#[test]
fn transaction_list_shows_both_kinds() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["account", "create", "Checking", "--balance", "100.00"])
        .assert()
        .success();
    tally(&dir)
        .args(["account", "create", "Savings"])
        .assert()
        .success();

    tally(&dir)
        .args([
            "flow",
            "add",
            "expense",
            "Checking",
            "5.00",
            "--description",
            "coffee",
        ])
        .assert()
        .success();
    tally(&dir)
        .args(["transfer", "add", "Checking", "Savings", "10.00"])
        .assert()
        .success();

    tally(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense"))
        .stdout(predicate::str::contains("Transfer"))
        .stdout(predicate::str::contains("coffee"))
        .stdout(predicate::str::contains("Checking -> Savings"));
}
