//! Money and bar formatting shared by the renderers.

use tally_core::{BudgetStatus, BudgetUsage};

/// Width of the monthly budget progress bar, in cells.
pub const BUDGET_BAR_WIDTH: usize = 20;

/// Renders `amount` as `$1,234.50`; negative values get a leading `-`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(amount.abs()))
}

/// List-style amount: income carries an explicit `+`, expenses print bare.
pub fn format_signed(symbol: &str, amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", format_amount(symbol, amount))
    } else {
        format!("{symbol}{}", group_thousands(amount.abs()))
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{cents}")
}

/// Horizontal bar of `width` cells filled to `ratio` (clamped to `[0, 1]`).
pub fn bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `[█████░░░…] 42%` for the current month's spending.
pub fn budget_bar(usage: &BudgetUsage) -> String {
    let pct = usage.percentage().unwrap_or(0.0);
    format!(
        "[{}] {:.0}%",
        bar(usage.fill_ratio(), BUDGET_BAR_WIDTH),
        pct
    )
}

pub fn budget_status_text(symbol: &str, usage: &BudgetUsage) -> String {
    match usage.status {
        BudgetStatus::Unset => "No budget set".to_string(),
        BudgetStatus::Remaining { remaining, .. } => format!(
            "{} remaining of {}",
            format_amount(symbol, remaining),
            format_amount(symbol, usage.monthly_budget)
        ),
        BudgetStatus::OverBudget { overage, .. } => {
            format!("Over budget by {}", format_amount(symbol, overage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::BudgetService;
    use tally_domain::{Transaction, TransactionId, TransactionKind};

    #[test]
    fn amounts_use_two_decimals_and_grouping() {
        assert_eq!(format_amount("$", 5.0), "$5.00");
        assert_eq!(format_amount("$", -5.0), "-$5.00");
        assert_eq!(format_amount("$", 1234567.891), "$1,234,567.89");
        assert_eq!(format_amount("€", 999.999), "€1,000.00");
    }

    #[test]
    fn signed_amounts_mark_income_only() {
        assert_eq!(format_signed("$", 50.0), "+$50.00");
        assert_eq!(format_signed("$", -12.5), "$12.50");
    }

    #[test]
    fn bars_clamp_their_fill() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(3.0, 4), "████");
        assert_eq!(bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn budget_text_follows_status() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let spent = vec![Transaction::new(
            TransactionId(1),
            "Groceries",
            150.0,
            "food".into(),
            TransactionKind::Expense,
            date,
            chrono::Utc::now(),
        )];

        let over = BudgetService::usage(&spent, 100.0, date);
        assert_eq!(budget_status_text("$", &over), "Over budget by $50.00");
        assert!(budget_bar(&over).ends_with("150%"));

        let under = BudgetService::usage(&spent, 200.0, date);
        assert_eq!(
            budget_status_text("$", &under),
            "$50.00 remaining of $200.00"
        );

        let unset = BudgetService::usage(&spent, 0.0, date);
        assert_eq!(budget_status_text("$", &unset), "No budget set");
    }
}
