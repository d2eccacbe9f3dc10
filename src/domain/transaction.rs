//! Domain types for stored transaction records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FinanceError;

/// Direction of a transaction. The wire names follow the stored format
/// (`"positive"` / `"negative"`); the plain names are accepted as aliases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    #[serde(rename = "positive", alias = "income")]
    Income,
    #[serde(rename = "negative", alias = "expense")]
    Expense,
}

/// A single persisted transaction.
///
/// `amount` is always non-negative; direction is carried by `kind` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "wire_amount")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl TransactionRecord {
    /// Rejects records that violate the stored-data invariants.
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.amount.is_sign_negative() {
            return Err(FinanceError::InvalidRecord(format!(
                "record {} has negative amount {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

/// Input for registering a new transaction; identity and timestamp are
/// assigned at registration time.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub name: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
}

impl NewTransaction {
    pub fn into_record(self, date: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date,
        }
    }
}

/// Amounts arrive either as a JSON number or as a numeric string, depending
/// on which version of the app wrote the blob. Both decode losslessly: the
/// number path goes through its shortest decimal rendering rather than the
/// raw binary float.
mod wire_amount {
    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(value) => {
                if !value.is_finite() {
                    return Err(de::Error::custom("amount is not a finite number"));
                }
                value.to_string()
            }
            RawAmount::Text(value) => value.trim().to_string(),
        };
        Decimal::from_str(&raw)
            .map_err(|_| de::Error::custom(format!("amount `{}` is not numeric", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_json(amount: &str) -> String {
        format!(
            r#"{{
                "id": "a1",
                "name": "Mercado",
                "amount": {},
                "type": "negative",
                "category": "food",
                "date": "2020-04-10T12:00:00Z"
            }}"#,
            amount
        )
    }

    #[test]
    fn decodes_amount_from_number() {
        let record: TransactionRecord = serde_json::from_str(&record_json("59.9")).unwrap();
        assert_eq!(record.amount, Decimal::new(599, 1));
        assert_eq!(record.kind, TransactionKind::Expense);
    }

    #[test]
    fn decodes_amount_from_numeric_string() {
        let record: TransactionRecord = serde_json::from_str(&record_json("\"1200.50\"")).unwrap();
        assert_eq!(record.amount, Decimal::new(120050, 2));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let result: Result<TransactionRecord, _> =
            serde_json::from_str(&record_json("\"muito caro\""));
        assert!(result.is_err());
    }

    #[test]
    fn accepts_plain_kind_aliases() {
        let json = record_json("10").replace("negative", "expense");
        let record: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.kind, TransactionKind::Expense);
    }

    #[test]
    fn serializes_amount_as_string() {
        let record = NewTransaction {
            name: "Salário".into(),
            amount: Decimal::new(1200050, 2),
            kind: TransactionKind::Income,
            category: "salary".into(),
        }
        .into_record(Utc.with_ymd_and_hms(2020, 4, 13, 9, 0, 0).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["amount"], "12000.50");
        assert_eq!(json["type"], "positive");
    }

    #[test]
    fn validate_flags_negative_amount() {
        let mut record: TransactionRecord = serde_json::from_str(&record_json("10")).unwrap();
        record.amount = Decimal::new(-10, 0);
        assert!(record.validate().is_err());
    }
}
