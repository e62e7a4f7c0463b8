//! tally-domain
//!
//! Pure domain models (Transaction, Category, LedgerState, MonthKey).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod state;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use state::*;
pub use transaction::*;
