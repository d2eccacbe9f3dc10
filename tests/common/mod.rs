use chrono::{DateTime, TimeZone, Utc};
use finances_core::domain::{TransactionKind, TransactionRecord};
use rust_decimal::Decimal;

pub fn april(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 4, day, 12, 0, 0).unwrap()
}

pub fn record(
    id: &str,
    amount: i64,
    kind: TransactionKind,
    category: &str,
    day: u32,
) -> TransactionRecord {
    TransactionRecord {
        id: id.into(),
        name: format!("txn {}", id),
        amount: Decimal::new(amount, 0),
        kind,
        category: category.into(),
        date: april(day),
    }
}
