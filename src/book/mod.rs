//! Read and write access to the stored transaction list.
//!
//! `TransactionBook` is the caller-facing surface: screens invoke it on
//! every activation and it reads the store fresh each time, so repeated
//! invocations are idempotent and may race benignly.

use chrono::Utc;
use tracing::warn;

use crate::{
    currency::LocaleConfig,
    domain::{category, NewTransaction, TransactionRecord},
    errors::{FinanceError, Result},
    report::{self, CategorySlice, Overview},
    storage::RecordStore,
};

/// Default namespaced key under which the whole transaction list is stored.
pub const DEFAULT_STORAGE_KEY: &str = "@finances:transactions";

pub struct TransactionBook<S: RecordStore> {
    store: S,
    key: String,
    locale: LocaleConfig,
}

impl<S: RecordStore> TransactionBook<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY, LocaleConfig::default())
    }

    pub fn with_key(store: S, key: impl Into<String>, locale: LocaleConfig) -> Self {
        Self {
            store,
            key: key.into(),
            locale,
        }
    }

    /// Loads and decodes the stored records.
    ///
    /// A corrupt blob degrades to an empty list with a warning rather than
    /// failing the read path; only [`register`](Self::register) treats
    /// corruption as an error, so a bad blob is never silently overwritten.
    pub fn list(&self) -> Result<Vec<TransactionRecord>> {
        let raw = self.store.get(&self.key)?;
        match report::decode_records(raw.as_deref()) {
            Ok(decoded) => {
                if decoded.skipped > 0 {
                    warn!(skipped = decoded.skipped, "dropped malformed records");
                }
                Ok(decoded.records)
            }
            Err(FinanceError::DataCorruption(reason)) => {
                warn!(%reason, "stored transactions are corrupt, treating as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Validates and appends a new transaction to the stored list.
    pub fn register(&self, entry: NewTransaction) -> Result<TransactionRecord> {
        validate_entry(&entry)?;
        let raw = self.store.get(&self.key)?;
        let mut records = report::decode_records(raw.as_deref())?.records;
        let record = entry.into_record(Utc::now());
        records.push(record.clone());
        let json = serde_json::to_string_pretty(&records)?;
        self.store.set(&self.key, &json)?;
        Ok(record)
    }

    /// Builds the highlight/listing view-model from a fresh load.
    pub fn overview(&self) -> Result<Overview> {
        let records = self.list()?;
        Ok(report::build_overview(
            &records,
            category::table(),
            &self.locale,
        ))
    }

    /// Builds the per-category resume rows from a fresh load.
    pub fn resume(&self) -> Result<Vec<CategorySlice>> {
        let records = self.list()?;
        Ok(report::category_breakdown(
            &records,
            category::table(),
            &self.locale,
        ))
    }

    /// Removes the stored list entirely.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

fn validate_entry(entry: &NewTransaction) -> Result<()> {
    if entry.name.trim().is_empty() {
        return Err(FinanceError::InvalidInput("name is required".into()));
    }
    if entry.amount.is_sign_negative() || entry.amount.is_zero() {
        return Err(FinanceError::InvalidInput(
            "amount must be a positive value".into(),
        ));
    }
    if category::find(&entry.category).is_none() {
        return Err(FinanceError::InvalidInput(format!(
            "unknown category `{}`",
            entry.category
        )));
    }
    Ok(())
}
