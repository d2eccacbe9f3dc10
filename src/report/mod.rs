//! The aggregation pipeline: decode stored records, compute totals and the
//! per-category breakdown, and format everything for display.
//!
//! Every function here is a pure function of (records, categories, locale);
//! callers re-invoke them on each screen activation and discard the
//! resulting view-model after rendering.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::{
    currency::{
        format_currency_value, format_date_long, format_date_short, format_percent, LocaleConfig,
    },
    domain::{category, Category, TransactionKind, TransactionRecord},
    errors::{FinanceError, Result},
};

/// Outcome of decoding the stored blob. Malformed elements are dropped
/// individually; `skipped` reports how many.
#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

/// Decodes the raw stored blob into validated records.
///
/// An absent or empty blob is an empty record set. A blob that is not a
/// JSON array fails with [`FinanceError::DataCorruption`]. Individual
/// elements that do not decode or validate are skipped with a warning so
/// one bad record cannot poison the whole aggregation.
pub fn decode_records(raw: Option<&str>) -> Result<Decoded> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(Decoded::default()),
    };
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| FinanceError::DataCorruption(err.to_string()))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(FinanceError::DataCorruption(format!(
                "expected a JSON array of records, found {}",
                json_type_name(&other)
            )))
        }
    };

    let mut decoded = Decoded::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TransactionRecord>(item)
            .map_err(|err| FinanceError::InvalidRecord(err.to_string()))
            .and_then(|record| record.validate().map(|_| record))
        {
            Ok(record) => decoded.records.push(record),
            Err(err) => {
                warn!(index, %err, "skipping malformed transaction record");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Exact per-kind totals. `net` may be negative.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Sums records by kind with exact decimal arithmetic.
pub fn compute_totals(records: &[TransactionRecord]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for record in records {
        match record.kind {
            TransactionKind::Income => income += record.amount,
            TransactionKind::Expense => expense += record.amount,
        }
    }
    Totals {
        income,
        expense,
        net: income - expense,
    }
}

/// One row of the per-category resume screen.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySlice {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub total: Decimal,
    pub formatted_total: String,
    pub percent: String,
}

/// Sums expense records per category, in category-table order.
///
/// Categories with no matching expense are omitted rather than emitted as
/// zero rows, so a zero grand total yields an empty breakdown and the
/// percent ratio is never computed against a zero denominator. Records
/// whose category key is not in the table are left out here but still
/// count toward [`compute_totals`].
pub fn category_breakdown(
    records: &[TransactionRecord],
    categories: &[Category],
    locale: &LocaleConfig,
) -> Vec<CategorySlice> {
    let expenses: Vec<&TransactionRecord> = records
        .iter()
        .filter(|record| record.kind == TransactionKind::Expense)
        .collect();
    let grand_total: Decimal = expenses.iter().map(|record| record.amount).sum();

    let mut slices = Vec::new();
    for entry in categories {
        let total: Decimal = expenses
            .iter()
            .filter(|record| record.category == entry.key)
            .map(|record| record.amount)
            .sum();
        if total.is_zero() {
            continue;
        }
        slices.push(CategorySlice {
            key: entry.key,
            name: entry.name,
            color: entry.color,
            total,
            formatted_total: format_currency_value(total, locale),
            percent: format_percent(total / grand_total),
        });
    }
    slices
}

/// Label for the most recent transaction of a kind, e.g. `13 de abril`.
/// Returns `None` when no transaction of that kind exists.
pub fn last_transaction_label(
    records: &[TransactionRecord],
    kind: TransactionKind,
) -> Option<String> {
    records
        .iter()
        .filter(|record| record.kind == kind)
        .map(|record| record.date)
        .max()
        .map(format_date_long)
}

/// Covered-period label for the highlight total, from the first of the
/// month through the latest transaction of any kind.
pub fn period_label(records: &[TransactionRecord]) -> Option<String> {
    records
        .iter()
        .map(|record| record.date)
        .max()
        .map(|date| format!("01 à {}", format_date_long(date)))
}

/// One row of the transaction listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionView {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: Option<Category>,
    pub date: String,
}

/// Formats records for the listing screen, preserving stored order.
pub fn format_entries(records: &[TransactionRecord], locale: &LocaleConfig) -> Vec<TransactionView> {
    records
        .iter()
        .map(|record| TransactionView {
            id: record.id.clone(),
            name: record.name.clone(),
            amount: format_currency_value(record.amount, locale),
            kind: record.kind,
            category: category::find(&record.category).cloned(),
            date: format_date_short(record.date),
        })
        .collect()
}

/// An exact amount paired with its display string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AmountView {
    pub raw: Decimal,
    pub formatted: String,
}

fn amount_view(raw: Decimal, locale: &LocaleConfig) -> AmountView {
    AmountView {
        raw,
        formatted: format_currency_value(raw, locale),
    }
}

/// The complete view-model consumed by the screens. Recomputed wholesale on
/// every build; holds no identity across calls.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overview {
    pub income: AmountView,
    pub expense: AmountView,
    pub net: AmountView,
    pub last_income: Option<String>,
    pub last_expense: Option<String>,
    pub period_label: Option<String>,
    pub entries: Vec<TransactionView>,
    pub resume: Vec<CategorySlice>,
}

/// Assembles the full view-model in one pass over the records.
pub fn build_overview(
    records: &[TransactionRecord],
    categories: &[Category],
    locale: &LocaleConfig,
) -> Overview {
    let totals = compute_totals(records);
    Overview {
        income: amount_view(totals.income, locale),
        expense: amount_view(totals.expense, locale),
        net: amount_view(totals.net, locale),
        last_income: last_transaction_label(records, TransactionKind::Income),
        last_expense: last_transaction_label(records, TransactionKind::Expense),
        period_label: period_label(records),
        entries: format_entries(records, locale),
        resume: category_breakdown(records, categories, locale),
    }
}
