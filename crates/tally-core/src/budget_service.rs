use chrono::NaiveDate;
use tally_domain::{MonthKey, Transaction};

/// Where the month's spending stands relative to the budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    /// No budget configured.
    Unset,
    Remaining { percentage: f64, remaining: f64 },
    OverBudget { percentage: f64, overage: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub month: MonthKey,
    pub monthly_budget: f64,
    pub monthly_expenses: f64,
    pub status: BudgetStatus,
}

impl BudgetUsage {
    /// Unclamped share of the budget spent, `None` when no budget is set.
    pub fn percentage(&self) -> Option<f64> {
        match self.status {
            BudgetStatus::Unset => None,
            BudgetStatus::Remaining { percentage, .. }
            | BudgetStatus::OverBudget { percentage, .. } => Some(percentage),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        matches!(self.status, BudgetStatus::OverBudget { .. })
    }

    /// Share of the budget spent clamped to `[0, 1]`, for progress bars.
    pub fn fill_ratio(&self) -> f64 {
        self.percentage()
            .map(|pct| (pct / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

pub struct BudgetService;

impl BudgetService {
    /// Sums expense magnitudes dated in the reference month.
    pub fn monthly_expenses(transactions: &[Transaction], month: MonthKey) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && month.contains(txn.date))
            .map(Transaction::magnitude)
            .sum()
    }

    pub fn usage(
        transactions: &[Transaction],
        monthly_budget: f64,
        reference: NaiveDate,
    ) -> BudgetUsage {
        let month = MonthKey::of(reference);
        let monthly_expenses = Self::monthly_expenses(transactions, month);
        let status = if monthly_budget > 0.0 {
            let percentage = monthly_expenses / monthly_budget * 100.0;
            if percentage > 100.0 {
                BudgetStatus::OverBudget {
                    percentage,
                    overage: monthly_expenses - monthly_budget,
                }
            } else {
                BudgetStatus::Remaining {
                    percentage,
                    remaining: monthly_budget - monthly_expenses,
                }
            }
        } else {
            BudgetStatus::Unset
        };
        BudgetUsage {
            month,
            monthly_budget,
            monthly_expenses,
            status,
        }
    }
}
