use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::domain::account::Account;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::errors::{BankingError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
// Wire literals of the interchange schema.
const STATUS_EFFECTUATED: &str = "EFETIVADA";
const STATUS_FUTURE: &str = "FUTURA";

const ACCOUNT_HEADER: [&str; 4] = ["id", "holderName", "openingDate", "balance"];
const TRANSACTION_HEADER: [&str; 5] = ["id", "accountId", "amount", "date", "status"];

/// Writes one row per account under the `id,holderName,openingDate,balance`
/// header. Dates are truncated to day precision by the schema.
pub fn save_accounts<'a, I>(path: &Path, accounts: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ACCOUNT_HEADER)?;
    for account in accounts {
        let opened = format_date(account.opened_at());
        let balance = account.balance().to_string();
        writer.write_record([
            account.id(),
            account.holder_name(),
            opened.as_str(),
            balance.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads accounts back, restoring persisted balances.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut accounts = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = field(&record, 0, "id")?;
        let holder_name = field(&record, 1, "holderName")?;
        let opened_at = parse_date(field(&record, 2, "openingDate")?)?;
        let balance = parse_decimal(field(&record, 3, "balance")?)?;
        accounts.push(Account::restore(id, holder_name, opened_at, balance));
    }
    Ok(accounts)
}

/// Writes one row per transaction under the `id,accountId,amount,date,status`
/// header, status spelled as the `EFETIVADA`/`FUTURA` wire literals.
pub fn save_transactions<'a, I>(path: &Path, transactions: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TRANSACTION_HEADER)?;
    for tx in transactions {
        let amount = tx.amount().to_string();
        let date = format_date(tx.timestamp());
        writer.write_record([
            tx.id(),
            tx.account_id(),
            amount.as_str(),
            date.as_str(),
            format_status(tx.status()),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads transactions back through the status-aware constructor.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut transactions = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = field(&record, 0, "id")?;
        let account_id = field(&record, 1, "accountId")?;
        let amount = parse_decimal(field(&record, 2, "amount")?)?;
        let timestamp = parse_date(field(&record, 3, "date")?)?;
        let status = parse_status(field(&record, 4, "status")?)?;
        transactions.push(Transaction::with_status(
            id, account_id, amount, timestamp, status,
        ));
    }
    Ok(transactions)
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| BankingError::StorageError(format!("missing `{name}` column")))
}

fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| BankingError::StorageError(format!("invalid date `{value}`: {err}")))?;
    Ok(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    ))
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|err| BankingError::StorageError(format!("invalid amount `{value}`: {err}")))
}

fn format_status(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Effectuated => STATUS_EFFECTUATED,
        TransactionStatus::Future => STATUS_FUTURE,
    }
}

fn parse_status(value: &str) -> Result<TransactionStatus> {
    match value {
        STATUS_EFFECTUATED => Ok(TransactionStatus::Effectuated),
        STATUS_FUTURE => Ok(TransactionStatus::Future),
        other => Err(BankingError::StorageError(format!(
            "unknown transaction status `{other}`"
        ))),
    }
}
