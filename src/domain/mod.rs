pub mod category;
pub mod transaction;

pub use category::{table, Category};
pub use transaction::{NewTransaction, TransactionKind, TransactionRecord};
