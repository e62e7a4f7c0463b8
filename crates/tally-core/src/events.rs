use std::fmt;

use tally_domain::TransactionId;

/// Emitted after every successful in-memory mutation so the presentation
/// layer can re-render on its own schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    TransactionAdded { id: TransactionId },
    /// `removed` is false when no transaction carried `id`.
    TransactionDeleted { id: TransactionId, removed: bool },
    Cleared { removed: usize },
    BudgetChanged { amount: f64 },
    Replaced { transactions: usize },
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::TransactionAdded { id } => write!(f, "transaction {id} added"),
            LedgerEvent::TransactionDeleted { id, removed: true } => {
                write!(f, "transaction {id} deleted")
            }
            LedgerEvent::TransactionDeleted { id, removed: false } => {
                write!(f, "transaction {id} not found")
            }
            LedgerEvent::Cleared { removed } => write!(f, "{removed} transaction(s) cleared"),
            LedgerEvent::BudgetChanged { amount } => write!(f, "monthly budget set to {amount}"),
            LedgerEvent::Replaced { transactions } => {
                write!(f, "ledger replaced with {transactions} transaction(s)")
            }
        }
    }
}
