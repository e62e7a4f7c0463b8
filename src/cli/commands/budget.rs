use tally_core::{BudgetUsage, LedgerEvent, Summary};

use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};
use crate::cli::ui::format::{budget_bar, budget_status_text, format_amount};

use super::parse_value;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Show or set the monthly budget",
            "budget [amount]",
            cmd_budget,
        ),
        CommandEntry::new(
            "summary",
            "Show income, expenses, balance and budget usage",
            "summary",
            cmd_summary,
        )
        .with_aliases(&["status"]),
    ]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let usage = context.ledger.monthly_budget_usage(context.ledger.today());
            output::section(format!("Budget for {}", usage.month));
            output::block(render_budget(&usage, context.currency()));
            if context.ledger.monthly_budget() <= 0.0 {
                output::hint("Set one with `budget <amount>`.");
            }
            Ok(())
        }
        [raw] => {
            let amount: f64 = parse_value(raw, "amount")?;
            if let LedgerEvent::BudgetChanged { amount } = context.ledger.set_budget(amount)? {
                output::success(format!(
                    "Monthly budget set to {}.",
                    format_amount(context.currency(), amount)
                ));
            }
            Ok(())
        }
        _ => Err(CommandError::usage("budget [amount]")),
    }
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.ledger.summary();
    let usage = context.ledger.monthly_budget_usage(context.ledger.today());
    output::section("Summary");
    output::block(render_summary(&summary, context.currency()));
    output::section(format!("Budget for {}", usage.month));
    output::block(render_budget(&usage, context.currency()));
    Ok(())
}

pub(crate) fn render_summary(summary: &Summary, currency: &str) -> String {
    [
        ("Income", summary.income),
        ("Expenses", summary.expenses),
        ("Balance", summary.balance),
    ]
    .iter()
    .map(|(label, value)| format!("  {label:<9} {:>14}", format_amount(currency, *value)))
    .collect::<Vec<_>>()
    .join("\n")
}

pub(crate) fn render_budget(usage: &BudgetUsage, currency: &str) -> String {
    let status = budget_status_text(currency, usage);
    if usage.monthly_budget <= 0.0 {
        return format!("  {status}");
    }
    format!(
        "  Spent     {} of {}\n  {}\n  {status}",
        format_amount(currency, usage.monthly_expenses),
        format_amount(currency, usage.monthly_budget),
        budget_bar(usage)
    )
}
