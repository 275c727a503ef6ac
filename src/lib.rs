#![doc(test(attr(deny(warnings))))]

//! Savings Core offers the ledger, vault, and CSV primitives behind a
//! personal savings tracker and its CLI.

pub mod cli;
pub mod csv;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Savings Core tracing initialized.");
    });
}
