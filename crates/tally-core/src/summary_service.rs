use tally_domain::Transaction;

/// Lifetime totals across every recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub income: f64,
    /// Magnitude of all expenses, always non-negative.
    pub expenses: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(transactions: &[Transaction]) -> Summary {
        let income: f64 = transactions
            .iter()
            .filter(|txn| txn.is_income())
            .map(|txn| txn.amount)
            .sum();
        let expenses = transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount)
            .sum::<f64>()
            .abs();
        Summary {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}
