use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn currency_list_shows_defaults() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["currency", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USD"))
        .stdout(predicate::str::contains("ARS"))
        .stdout(predicate::str::contains("EUR"))
        .stdout(predicate::str::contains("BTC"));
}

#[test]
fn convert_uses_rate_table() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["currency", "convert", "1000", "ars", "usd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000.00 ARS = 1.00 USD"));
}

#[test]
fn convert_unknown_currency_fails() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["currency", "convert", "5", "GBP", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown currency: GBP"));
}

#[test]
fn anchor_currency_cannot_be_removed() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["currency", "remove", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Protected resource"));
}

#[test]
fn summary_after_recording_entries() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["currency", "remove", "BTC"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["list", "create", "Test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created expense list: Test"));
    fintrack(&dir)
        .args(["expense", "add", "Test", "Rent", "1000", "ARS", "-d", "2025-01-15"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["income", "add", "Bonus", "10", "EUR"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["summary", "-c", "USD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary (USD)"))
        .stdout(predicate::str::contains("11.00 USD"))
        .stdout(predicate::str::contains("1.00 USD"))
        .stdout(predicate::str::contains("10.00 USD"));

    assert!(dir.path().join("data").join("expenseLists.json").exists());
    assert!(dir.path().join("data").join("incomes.json").exists());
}

#[test]
fn list_show_displays_expenses() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).args(["list", "create", "Trip"]).assert().success();
    fintrack(&dir)
        .args(["expense", "add", "trip", "Hotel", "120", "EUR", "--date", "2025-07-04"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["list", "show", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hotel"))
        .stdout(predicate::str::contains("2025-07-04"))
        .stdout(predicate::str::contains("132.00 USD"));
}

#[test]
fn list_show_converts_each_expense() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).args(["list", "create", "Trip"]).assert().success();
    fintrack(&dir)
        .args(["expense", "add", "Trip", "Hotel", "120", "EUR", "-d", "2025-07-04"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["expense", "add", "Trip", "Taxi", "5500", "ARS", "-d", "2025-07-05"])
        .assert()
        .success();

    let output = fintrack(&dir)
        .args(["list", "show", "Trip", "-c", "ARS"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("Converted"));
    let hotel = stdout.lines().find(|l| l.contains("Hotel")).unwrap();
    assert!(hotel.contains("132000.00 ARS"), "{}", hotel);
    let taxi = stdout.lines().find(|l| l.contains("Taxi")).unwrap();
    assert!(taxi.contains("5500.00 ARS"), "{}", taxi);
    assert!(stdout.contains("Total: 137500.00 ARS"));
}

#[test]
fn rename_keeps_expenses() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).args(["list", "create", "Food"]).assert().success();
    fintrack(&dir)
        .args(["expense", "add", "Food", "Bread", "3", "USD", "-d", "2025-02-01"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["list", "rename", "Food", "Groceries"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["list", "show", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bread"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["income", "add", "Nothing", "0", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["income", "add", "Salary", "100", "USD"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["reset", "incomes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    assert!(dir.path().join("data").join("incomes.json").exists());

    fintrack(&dir)
        .args(["reset", "incomes", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset incomes"));
    assert!(!dir.path().join("data").join("incomes.json").exists());

    fintrack(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No incomes recorded."));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"))
        .stdout(predicate::str::contains("Conversion policy"));
}

#[test]
fn config_set_is_saved_and_applied() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["config", "set", "default-currency", "eur"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default-currency = eur"));
    fintrack(&dir)
        .args(["config", "set", "conversion-policy", "lenient"])
        .assert()
        .success();
    assert!(dir.path().join("config.json").exists());

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default currency:     EUR"))
        .stdout(predicate::str::contains("Lenient"));

    fintrack(&dir)
        .args(["income", "add", "Salary", "11", "USD"])
        .assert()
        .success();
    fintrack(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary (EUR)"))
        .stdout(predicate::str::contains("10.00 EUR"));
}

#[test]
fn config_set_rejects_unknown_values() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["config", "set", "missing-id-policy", "panic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown missing id policy"));
    fintrack(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!dir.path().join("config.json").exists());
}
