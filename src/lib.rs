#![doc(test(attr(deny(warnings))))]

//! Tally is a personal income/expense tracker: a ledger of transactions with
//! a monthly budget, summary totals, a category breakdown and a six month
//! trend, driven from an interactive terminal shell.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Tally tracing initialized.");
    });
}
