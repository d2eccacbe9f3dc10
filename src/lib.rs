#![doc(test(attr(deny(warnings))))]

//! Finances Core provides the persistence, domain model, and aggregation
//! pipeline behind a personal expense tracker: transactions stored as a
//! single JSON blob in a string-keyed local store, a fixed category table,
//! and pure view-model builders for listing, highlight, and per-category
//! resume screens.

pub mod book;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finances Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
