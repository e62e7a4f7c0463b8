//! Chart-facing aggregations: per-category expense totals and the rolling
//! income/expense trend.

use std::collections::HashMap;

use chrono::NaiveDate;
use tally_domain::{Category, MonthKey, Transaction};

/// Number of calendar months covered by the trend, reference month included.
pub const TREND_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Expense magnitude per category, in the order each category first appears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.total).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One month of the trend series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub month: MonthKey,
    /// Display label only; never parsed back.
    pub label: String,
    pub income_total: f64,
    pub expense_total: f64,
}

pub struct ReportService;

impl ReportService {
    pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
        let mut index: HashMap<&Category, usize> = HashMap::new();
        let mut entries: Vec<CategoryTotal> = Vec::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            match index.get(&txn.category) {
                Some(&slot) => entries[slot].total += txn.magnitude(),
                None => {
                    index.insert(&txn.category, entries.len());
                    entries.push(CategoryTotal {
                        category: txn.category.clone(),
                        total: txn.magnitude(),
                    });
                }
            }
        }
        CategoryBreakdown { entries }
    }

    /// Totals for the [`TREND_MONTHS`] calendar months ending at `reference`,
    /// oldest first. Months without activity report zero.
    pub fn six_month_trend(transactions: &[Transaction], reference: NaiveDate) -> Vec<TrendPoint> {
        let current = MonthKey::of(reference);
        let mut points: Vec<TrendPoint> = (0..TREND_MONTHS as i32)
            .rev()
            .map(|back| {
                let month = current.shift(-back);
                TrendPoint {
                    month,
                    label: month.label(),
                    income_total: 0.0,
                    expense_total: 0.0,
                }
            })
            .collect();

        for txn in transactions {
            let month = txn.month();
            if let Some(point) = points.iter_mut().find(|point| point.month == month) {
                if txn.is_income() {
                    point.income_total += txn.amount;
                } else {
                    point.expense_total += txn.magnitude();
                }
            }
        }
        points
    }
}
