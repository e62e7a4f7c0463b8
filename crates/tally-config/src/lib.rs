//! tally-config
//!
//! User preferences for the tally shell: currency symbol, colors,
//! confirmation prompts and an optional data directory. Stored as one JSON
//! file, separate from ledger data.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
