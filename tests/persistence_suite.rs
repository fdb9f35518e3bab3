use banking_core::{
    domain::{Account, Transaction, TransactionStatus},
    ledger::TransactionLedger,
    services::AccountDirectory,
    storage::{csv_backend, json_backend, LedgerSnapshot},
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
}

fn sample_accounts() -> Vec<Account> {
    vec![
        Account::restore("001", "Alice", opened_at(), Decimal::new(123_45, 2)),
        Account::new("002", "Bob", opened_at()),
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::with_status(
            "tx1",
            "001",
            Decimal::new(5000_00, 2),
            opened_at(),
            TransactionStatus::Effectuated,
        ),
        Transaction::new("tx2", "001", Decimal::new(-1500_00, 2), opened_at()),
    ]
}

#[test]
fn account_csv_round_trip_restores_balances_at_day_precision() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("accounts.csv");
    let accounts = sample_accounts();
    csv_backend::save_accounts(&path, &accounts).expect("save accounts");

    let contents = fs::read_to_string(&path).expect("read csv");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("id,holderName,openingDate,balance"));
    assert_eq!(lines.next(), Some("001,Alice,2024-03-01,123.45"));

    let loaded = csv_backend::load_accounts(&path).expect("load accounts");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id(), "001");
    assert_eq!(loaded[0].holder_name(), "Alice");
    assert_eq!(loaded[0].balance(), Decimal::new(123_45, 2));
    // The schema keeps day precision only.
    assert_eq!(
        loaded[0].opened_at(),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(loaded[1].balance(), Decimal::ZERO);
}

#[test]
fn transaction_csv_round_trip_preserves_status_literals() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("transactions.csv");
    csv_backend::save_transactions(&path, &sample_transactions()).expect("save transactions");

    let contents = fs::read_to_string(&path).expect("read csv");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("id,accountId,amount,date,status"));
    assert_eq!(lines.next(), Some("tx1,001,5000.00,2024-03-01,EFETIVADA"));
    assert_eq!(lines.next(), Some("tx2,001,-1500.00,2024-03-01,FUTURA"));

    let loaded = csv_backend::load_transactions(&path).expect("load transactions");
    assert_eq!(loaded.len(), 2);
    assert!(loaded[0].is_effectuated());
    assert!(loaded[1].is_future());
    assert_eq!(loaded[1].amount(), Decimal::new(-1500_00, 2));
}

#[test]
fn loaded_rows_rebuild_a_working_system() {
    let temp = tempdir().unwrap();
    let accounts_path = temp.path().join("accounts.csv");
    let transactions_path = temp.path().join("transactions.csv");
    csv_backend::save_accounts(&accounts_path, &sample_accounts()).expect("save accounts");
    csv_backend::save_transactions(&transactions_path, &sample_transactions())
        .expect("save transactions");

    let mut directory = AccountDirectory::new();
    for account in csv_backend::load_accounts(&accounts_path).expect("load accounts") {
        directory.add_account(account).expect("adopt account");
    }
    let mut ledger = TransactionLedger::new();
    ledger.restore(csv_backend::load_transactions(&transactions_path).expect("load transactions"));

    assert_eq!(directory.len(), 2);
    assert_eq!(ledger.len(), 2);
    assert_eq!(
        directory.account("001").expect("account").balance(),
        Decimal::new(123_45, 2)
    );
    assert!(ledger.transaction("tx1").expect("tx1").is_effectuated());
}

#[test]
fn snapshot_round_trip_preserves_sub_day_timestamps() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ledger.json");
    let snapshot = LedgerSnapshot::new(sample_accounts(), sample_transactions());
    json_backend::save_snapshot(&path, &snapshot).expect("save snapshot");

    let loaded = json_backend::load_snapshot(&path).expect("load snapshot");
    assert_eq!(loaded.accounts.len(), 2);
    assert_eq!(loaded.transactions.len(), 2);
    assert_eq!(loaded.accounts[0], snapshot.accounts[0]);
    assert_eq!(loaded.transactions[0], snapshot.transactions[0]);
    // Full timestamps survive, unlike the CSV projection.
    assert_eq!(loaded.accounts[0].opened_at(), opened_at());
}

#[test]
fn snapshot_save_replaces_existing_files_and_leaves_no_temp_behind() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ledger.json");
    json_backend::save_snapshot(&path, &LedgerSnapshot::default()).expect("first save");
    let snapshot = LedgerSnapshot::new(sample_accounts(), Vec::new());
    json_backend::save_snapshot(&path, &snapshot).expect("second save");

    let loaded = json_backend::load_snapshot(&path).expect("load snapshot");
    assert_eq!(loaded.accounts.len(), 2);
    assert!(!temp.path().join("ledger.json.tmp").exists());
}

#[test]
fn loading_a_missing_snapshot_is_a_storage_error() {
    let temp = tempdir().unwrap();
    let err = json_backend::load_snapshot(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(
        err,
        banking_core::errors::BankingError::StorageError(_)
    ));
}
