use tally_core::{CategoryBreakdown, TrendPoint};

use crate::cli::context::ShellContext;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};
use crate::cli::ui::format::{bar, format_amount};
use crate::cli::ui::labels::category_label;
use crate::cli::ui::table::{Table, TableColumn};

const CHART_WIDTH: usize = 24;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "breakdown",
            "Chart expenses by category",
            "breakdown",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "trend",
            "Income and expenses for the last six months",
            "trend",
            cmd_trend,
        ),
    ]
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let breakdown = context.ledger.category_breakdown();
    output::section("Expenses by category");
    if breakdown.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }
    output::block(render_breakdown(&breakdown, context.currency()));
    Ok(())
}

/// One bar per category, scaled to the largest total.
pub(crate) fn render_breakdown(breakdown: &CategoryBreakdown, currency: &str) -> String {
    let total = breakdown.total();
    let largest = breakdown.iter().map(|entry| entry.total).fold(0.0, f64::max);
    let labels: Vec<String> = breakdown
        .iter()
        .map(|entry| category_label(&entry.category))
        .collect();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
        TableColumn::left(""),
    ]);
    for (entry, label) in breakdown.iter().zip(labels) {
        let share = if total > 0.0 { entry.total / total * 100.0 } else { 0.0 };
        let ratio = if largest > 0.0 { entry.total / largest } else { 0.0 };
        table.push_row(vec![
            label,
            format_amount(currency, entry.total),
            format!("{share:.1}%"),
            bar(ratio, CHART_WIDTH),
        ]);
    }
    table.render()
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let points = context.ledger.six_month_trend(context.ledger.today());
    output::section("Six month trend");
    output::block(render_trend(&points, context.currency()));
    Ok(())
}

pub(crate) fn render_trend(points: &[TrendPoint], currency: &str) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Net"),
    ]);
    for point in points {
        table.push_row(vec![
            point.label.clone(),
            format_amount(currency, point.income_total),
            format_amount(currency, point.expense_total),
            format_amount(currency, point.income_total - point.expense_total),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::test_support::script_context;
    use crate::cli::shell::handle_line;

    #[test]
    fn breakdown_scales_bars_to_the_largest_category() {
        let mut context = script_context();
        handle_line(&mut context, "add expense 30 food Lunch").unwrap();
        handle_line(&mut context, "add expense 10 transport Bus").unwrap();
        handle_line(&mut context, "add expense 20 food Dinner").unwrap();
        handle_line(&mut context, "add income 500 salary Pay").unwrap();

        let rendered = render_breakdown(&context.ledger.category_breakdown(), "$");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("🍔 Food") && lines[2].contains("$50.00"));
        assert!(lines[2].contains("83.3%") && lines[2].ends_with(&"█".repeat(CHART_WIDTH)));
        assert!(lines[3].contains("🚗 Transport") && lines[3].contains("16.7%"));
    }

    #[test]
    fn trend_lists_six_months_oldest_first() {
        let mut context = script_context();
        handle_line(&mut context, "add expense 40 bills Power --date 2024-01-15").unwrap();
        handle_line(&mut context, "add income 100 salary Pay").unwrap();

        let points = context.ledger.six_month_trend(context.ledger.today());
        let rendered = render_trend(&points, "$");
        let lines: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with(" Nov 2023"));
        assert!(lines[2].starts_with(" Jan 2024") && lines[2].ends_with("-$40.00"));
        assert!(lines[5].starts_with(" Apr 2024") && lines[5].ends_with("$100.00"));
    }
}
