use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn basket(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("basket").unwrap();
    cmd.env("BASKET_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

#[test]
fn test_new_list_then_add_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home)
        .args(["new", "Weekly", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created list 'Weekly Groceries'"));

    basket(home)
        .args(["add", "Paneer", "-c", "dairy", "-p", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Paneer'"));

    basket(home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Groceries"))
        .stdout(predicate::str::contains("Dairy"))
        .stdout(predicate::str::contains("₹80.00"));

    // Data lands in BASKET_HOME under the storage keys.
    assert!(home.join("shoppingLists.json").exists());
    assert!(home.join("selectedList.json").exists());
}

#[test]
fn test_default_command_shows_current_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "Party"]).assert().success();
    basket(home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Party"))
        .stdout(predicate::str::contains("No items yet"));
}

#[test]
fn test_toggle_marks_item_bought() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "Party"]).assert().success();
    basket(home).args(["add", "Chips"]).assert().success();
    basket(home).args(["add", "Cola"]).assert().success();

    basket(home)
        .args(["toggle", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bought 'Cola'"))
        .stdout(predicate::str::contains("50% done"));
}

#[test]
fn test_sort_twice_reverses() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "L"]).assert().success();
    basket(home)
        .args(["sort", "price"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted by Price ↑"));
    basket(home)
        .args(["sort", "price"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted by Price ↓"));
}

#[test]
fn test_out_of_range_index_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "L"]).assert().success();
    basket(home)
        .args(["rm", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_item_command_without_list_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    basket(temp_dir.path())
        .args(["add", "Milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No list selected"));
}

#[test]
fn test_negative_budget_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "L"]).assert().success();
    basket(home)
        .args(["budget", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget"));
}

#[test]
fn test_drop_requires_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "Keep"]).assert().success();
    basket(home)
        .args(["drop", "Keep"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    basket(home)
        .arg("lists")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep"));

    basket(home)
        .args(["drop", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted list 'Keep'"));

    basket(home)
        .arg("lists")
        .assert()
        .success()
        .stdout(predicate::str::contains("No lists yet"));
}

#[test]
fn test_select_switches_lists() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home).args(["new", "First"]).assert().success();
    basket(home).args(["new", "Second"]).assert().success();
    basket(home)
        .args(["select", "first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to 'First'"));
}

#[test]
fn test_export_writes_markdown() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let out_dir = home.join("exports");

    basket(home).args(["new", "Weekly", "Groceries"]).assert().success();
    basket(home).args(["add", "Rice", "-p", "120"]).assert().success();
    basket(home)
        .args(["config", "export-dir", out_dir.to_str().unwrap()])
        .assert()
        .success();

    basket(home)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 'Weekly Groceries'"));

    let exported: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(exported.len(), 1);
    let path = exported[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("weekly-groceries-"));
    assert!(name.ends_with(".md"));
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("Rice"));
}

#[test]
fn test_config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    basket(home)
        .args(["config", "rows-per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rows-per-page set to 10"));

    basket(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("rows-per-page = 10"))
        .stdout(predicate::str::contains("show-purchased = true"));
}

#[test]
fn test_grouped_help() {
    let temp_dir = tempfile::tempdir().unwrap();

    basket(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List Commands:"))
        .stdout(predicate::str::contains("Item Commands:"))
        .stdout(predicate::str::contains("Data Commands:"));
}
