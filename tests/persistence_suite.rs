use std::collections::HashMap;
use std::fs;
use std::path::Path;

use expense_tracker::{
    domain::{Expense, ExpenseDate},
    ledger::Ledger,
    storage::JsonStore,
};
use tempfile::tempdir;

fn expense(date: &str, description: &str, category: &str, amount: f64) -> Expense {
    Expense::new(
        ExpenseDate::parse(date).unwrap(),
        description,
        category,
        amount,
    )
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add(expense("20/01/2024", "Lunch", "Food", 12.5));
    ledger.add(expense("05/02/2024", "Bus", "Transport", 3.0));
    ledger.add(expense("18/01/2024", "Dinner", "Food", 22.0));
    ledger
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn save_then_load_round_trips_records_in_order() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let ledger = sample_ledger();
    store.save_expenses(&ledger).expect("save");

    let outcome = store.load_expenses().expect("load");
    assert!(outcome.issues.is_empty());
    assert_eq!(outcome.ledger, ledger);

    let descriptions: Vec<&str> = outcome
        .ledger
        .all()
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Lunch", "Bus", "Dinner"]);
}

#[test]
fn saved_file_uses_the_documented_shape() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new();
    ledger.add(expense("15/03/2024", "Coffee", "Food", 4.5));
    let path = store.save_expenses(&ledger).expect("save");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"date": "15/03/2024", "description": "Coffee", "category": "Food", "amount": 4.5}
        ])
    );
}

#[test]
fn missing_file_loads_as_empty_ledger() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let outcome = store.load_expenses().expect("missing file is not an error");
    assert!(outcome.ledger.is_empty());
    assert!(outcome.issues.is_empty());
}

#[test]
fn corrupt_file_fails_the_load_as_a_whole() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    fs::write(store.expenses_path(), "{ not json").unwrap();
    assert!(store.load_expenses().is_err());
}

#[test]
fn malformed_records_are_skipped_and_reported() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let raw = r#"[
        {"date": "20/01/2024", "description": "Lunch", "category": "Food", "amount": 12.5},
        {"date": "1/2/2024", "description": "Short date", "category": "Food", "amount": 1.0},
        {"description": "Missing date", "category": "Misc", "amount": 2.0},
        {"date": "05/02/2024", "description": "Bus", "category": "Transport", "amount": 3.0}
    ]"#;
    fs::write(store.expenses_path(), raw).unwrap();

    let outcome = store.load_expenses().expect("array itself is well formed");
    assert_eq!(outcome.ledger.len(), 2);
    assert_eq!(outcome.ledger.all()[0].description, "Lunch");
    assert_eq!(outcome.ledger.all()[1].description, "Bus");

    let skipped: Vec<usize> = outcome.issues.iter().map(|issue| issue.index).collect();
    assert_eq!(skipped, [1, 2]);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new();
    ledger.add(expense("20/01/2024", "Lunch", "Food", 12.5));
    let path = store.save_expenses(&ledger).expect("initial save");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name so the staged
    // write fails before the rename.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    ledger.add(expense("05/02/2024", "Bus", "Transport", 3.0));
    assert!(
        store.save_expenses(&ledger).is_err(),
        "expected save to fail when the temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );
}

#[test]
fn category_summary_round_trips() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let mut summary = HashMap::new();
    summary.insert(String::from("Food"), 23.5);
    summary.insert(String::from("Utilities"), 100.0);
    store.save_category_summary(&summary).expect("save summary");

    let loaded = store.load_category_summary().expect("load summary");
    assert_eq!(loaded, summary);
}

#[test]
fn missing_category_summary_loads_as_empty_map() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();

    let loaded = store.load_category_summary().expect("missing file is fine");
    assert!(loaded.is_empty());
}
