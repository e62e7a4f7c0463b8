use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn tally(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home)
        .env("TALLY_TODAY", "2024-04-18")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_reports_totals_and_balance() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin(
            "add income 1000 salary Paycheck\n\
             add expense 250 food Groceries\n\
             summary\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(contains("Added #"))
        .stdout(contains("Income         $1,000.00"))
        .stdout(contains("Expenses         $250.00"))
        .stdout(contains("Balance          $750.00"))
        .stdout(contains("No budget set"));
}

#[test]
fn over_budget_counts_only_the_current_month() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin(
            "budget 100\n\
             add expense 150 food Feast --date 2024-04-02\n\
             add expense 80 food Older --date 2024-03-30\n\
             budget\n",
        )
        .assert()
        .success()
        .stdout(contains("Budget for Apr 2024"))
        .stdout(contains("Spent     $150.00 of $100.00"))
        .stdout(contains("150%"))
        .stdout(contains("Over budget by $50.00"));
}

#[test]
fn state_survives_between_runs() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin("add expense 12.5 transport \"Bus pass\"\nbudget 300\n")
        .assert()
        .success();

    let data = home.path().join("data");
    let transactions = fs::read_to_string(data.join("transactions.json")).unwrap();
    assert!(transactions.contains("\"type\":\"expense\""));
    assert!(transactions.contains("\"amount\":-12.5"));
    assert_eq!(fs::read_to_string(data.join("monthlybudget.json")).unwrap(), "300");

    tally(home.path())
        .write_stdin("list --type expense --category transport\n")
        .assert()
        .success()
        .stdout(contains("Bus pass"))
        .stdout(contains("🚗 Transport"))
        .stdout(contains("1 transaction(s)"));
}

#[test]
fn breakdown_and_trend_render_charts() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin(
            "add expense 30 food Lunch\n\
             add expense 10 transport Bus\n\
             add expense 20 food Dinner\n\
             add income 200 freelance Gig --date 2024-02-10\n\
             breakdown\n\
             trend\n",
        )
        .assert()
        .success()
        .stdout(contains("=== Expenses by category ==="))
        .stdout(contains("83.3%"))
        .stdout(contains("Nov 2023"))
        .stdout(contains("Feb 2024"))
        .stdout(contains("$200.00"));
}

#[test]
fn bad_input_is_reported_and_the_shell_continues() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin("add expense 0 food Nothing\nbudgte 5\nadd expense 5 food Snack\nlist\n")
        .assert()
        .success()
        .stdout(contains("Invalid input: amount must be greater than zero"))
        .stdout(contains("Did you mean `budget`?"))
        .stdout(contains("Snack"));
}

#[test]
fn delete_and_clear_run_without_prompts_in_script_mode() {
    let home = tempdir().unwrap();
    tally(home.path())
        .write_stdin("add expense 5 food Snack\nadd expense 7 food Tea\nclear\nlist\n")
        .assert()
        .success()
        .stdout(contains("Cleared 2 transaction(s)."))
        .stdout(contains("No transactions found."));
}

#[test]
fn corrupt_data_loads_empty_with_a_warning() {
    let home = tempdir().unwrap();
    let data = home.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("transactions.json"), "{not json").unwrap();
    fs::write(data.join("monthlybudget.json"), "NaN").unwrap();

    tally(home.path())
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(contains("discarded unreadable transactions"))
        .stdout(contains("discarded unreadable budget"))
        .stdout(contains("Balance            $0.00"));
}

#[test]
fn non_utf8_data_file_does_not_stop_startup() {
    let home = tempdir().unwrap();
    let data = home.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("transactions.json"), [0xFF, 0xFE, b'[', b']']).unwrap();

    tally(home.path())
        .write_stdin("add expense 5 food Snack\nlist\n")
        .assert()
        .success()
        .stdout(contains("discarded unreadable transactions"))
        .stdout(contains("1 transaction(s)"));
}

#[test]
fn import_with_repeated_ids_is_refused() {
    let home = tempdir().unwrap();
    let snapshot = home.path().join("dupes.json");
    let record = r#"{"id":1705708800000,"description":"Lunch","amount":-12,
        "category":"food","type":"expense","date":"2024-01-20",
        "createdAt":"2024-01-20T00:00:00Z"}"#;
    fs::write(
        &snapshot,
        format!(r#"{{"transactions":[{record},{record}],"monthlyBudget":0}}"#),
    )
    .unwrap();

    tally(home.path())
        .write_stdin(format!("import {}\nlist\n", snapshot.display()))
        .assert()
        .success()
        .stdout(contains("id is used more than once"))
        .stdout(contains("No transactions found."));
}

#[test]
fn export_import_moves_a_ledger_between_homes() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let snapshot = first.path().join("snapshot.json");

    tally(first.path())
        .write_stdin(format!(
            "add income 42 other Refund\nexport {}\n",
            snapshot.display()
        ))
        .assert()
        .success()
        .stdout(contains("Exported 1 transaction(s)"));

    tally(second.path())
        .write_stdin(format!("import {}\nlist\n", snapshot.display()))
        .assert()
        .success()
        .stdout(contains("Imported 1 transaction(s)."))
        .stdout(contains("+$42.00"))
        .stdout(contains("Unknown command").not());
}
