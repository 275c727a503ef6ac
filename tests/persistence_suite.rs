mod common;

use std::fs;

use chrono::NaiveDate;
use savings_core::ledger::Theme;
use savings_core::storage::JsonStorage;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn every_mutation_survives_a_reopen() {
    let base = common::temp_base();

    let mut manager = common::open_at(base.clone());
    manager.add_transaction(50.0, 2, "test", date(2024, 1, 1)).unwrap();
    manager.set_goal(300.0).unwrap();
    manager.toggle_theme().unwrap();
    drop(manager);

    let reopened = common::open_at(base);
    assert_eq!(reopened.current_balance(), 100.0);
    assert_eq!(reopened.ledger().goal, 300.0);
    assert_eq!(reopened.ledger().theme, Theme::Dark);
}

#[test]
fn vault_transfer_survives_a_reopen() {
    let base = common::temp_base();

    let mut manager = common::open_at(base.clone());
    manager.add_transaction(25.0, 4, "", date(2024, 6, 1)).unwrap();
    manager.empty_into_vault().unwrap();
    drop(manager);

    let reopened = common::open_at(base);
    assert_eq!(reopened.ledger().vault_total, 100.0);
    assert!(reopened.ledger().transactions.is_empty());
}

#[test]
fn fresh_store_opens_with_defaults() {
    let manager = common::setup_manager();
    let ledger = manager.ledger();
    assert!(ledger.transactions.is_empty());
    assert_eq!(ledger.vault_total, 0.0);
    assert_eq!(ledger.goal, 10_000.0);
    assert_eq!(ledger.theme, Theme::Light);
}

#[test]
fn corrupt_blob_is_discarded_in_favour_of_defaults() {
    let base = common::temp_base();
    let storage = JsonStorage::new(Some(base.clone())).expect("storage");
    fs::write(storage.state_file(), "{\"transactions\": oops").expect("write corrupt blob");

    let manager = common::open_at(base.clone());
    assert!(manager.ledger().transactions.is_empty());
    assert_eq!(manager.ledger().goal, 10_000.0);

    // the first write-through replaces the corrupt blob
    let mut manager = manager;
    manager.quick_add(5.0).unwrap();
    drop(manager);
    let reopened = common::open_at(base);
    assert_eq!(reopened.current_balance(), 5.0);
}

#[test]
fn unknown_fields_in_the_blob_are_tolerated() {
    let base = common::temp_base();
    let storage = JsonStorage::new(Some(base.clone())).expect("storage");
    let blob = r#"{
        "transactions": [],
        "vaultTotal": 12.5,
        "goal": 800,
        "theme": "dark",
        "somethingNew": true
    }"#;
    fs::write(storage.state_file(), blob).expect("write blob");

    let manager = common::open_at(base);
    assert_eq!(manager.ledger().vault_total, 12.5);
    assert_eq!(manager.ledger().goal, 800.0);
    assert_eq!(manager.ledger().theme, Theme::Dark);
}

#[test]
fn partial_blob_falls_back_to_field_defaults() {
    let base = common::temp_base();
    let storage = JsonStorage::new(Some(base.clone())).expect("storage");
    fs::write(storage.state_file(), r#"{"vaultTotal": 7.0}"#).expect("write blob");

    let manager = common::open_at(base);
    assert_eq!(manager.ledger().vault_total, 7.0);
    assert_eq!(manager.ledger().goal, 10_000.0);
    assert_eq!(manager.ledger().theme, Theme::Light);
}
