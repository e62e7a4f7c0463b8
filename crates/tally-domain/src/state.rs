//! The complete persisted state of a ledger.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionId};

/// Newest-first transactions plus the monthly budget (`0.0` means unset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub monthly_budget: f64,
}

impl LedgerState {
    pub fn new(transactions: Vec<Transaction>, monthly_budget: f64) -> Self {
        Self {
            transactions,
            monthly_budget,
        }
    }

    /// Largest id present, used to seed id generation after a load.
    pub fn max_id(&self) -> Option<TransactionId> {
        self.transactions.iter().map(|txn| txn.id).max()
    }
}
