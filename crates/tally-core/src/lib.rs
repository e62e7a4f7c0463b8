//! tally-core
//!
//! The ledger and its aggregation services.
//! Depends on tally-domain. No CLI, no terminal I/O; persistence goes
//! through the [`storage::BlobStore`] seam.

pub mod budget_service;
pub mod error;
pub mod events;
pub mod ids;
pub mod ledger;
pub mod report_service;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use budget_service::*;
pub use error::CoreError;
pub use events::LedgerEvent;
pub use ids::IdGenerator;
pub use ledger::Ledger;
pub use report_service::*;
pub use storage::{BlobStore, MemoryBlobStore};
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::*;
