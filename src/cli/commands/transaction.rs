use chrono::NaiveDate;
use tally_core::{LedgerEvent, TransactionFilter, MATCH_ALL};
use tally_domain::{Category, NewTransaction, Transaction, TransactionId, TransactionKind};

use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};
use crate::cli::ui::format::{format_amount, format_signed};
use crate::cli::ui::labels::{category_label, kind_label};
use crate::cli::ui::table::{Table, TableColumn};

use super::{parse_value, CommandArgs};

const ADD_USAGE: &str =
    "add <income|expense> <amount> <category> <description...> [--date YYYY-MM-DD]";
const DELETE_USAGE: &str = "delete <id> [--yes]";
const LIST_USAGE: &str = "list [--type all|income|expense] [--category all|<name>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Delete a transaction by id", DELETE_USAGE, cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "clear",
            "Delete every transaction",
            "clear [--yes]",
            cmd_clear,
        ),
        CommandEntry::new("list", "List transactions, newest first", LIST_USAGE, cmd_list)
            .with_aliases(&["ls"]),
        CommandEntry::new(
            "categories",
            "Show categories and those in use",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = if args.is_empty() && context.can_prompt() {
        prompt_new_transaction(context)?
    } else {
        parse_new_transaction(args)?
    };

    let event = context.ledger.add_transaction(input)?;
    if let LedgerEvent::TransactionAdded { id } = event {
        if let Some(txn) = context.ledger.transaction(id) {
            output::success(format!(
                "Added #{id}: {} {} ({})",
                txn.description,
                format_signed(context.currency(), txn.amount),
                category_label(&txn.category)
            ));
        }
    }
    Ok(())
}

pub(crate) fn parse_new_transaction(args: &[&str]) -> Result<NewTransaction, CommandError> {
    let parsed = CommandArgs::parse(args, &["--date"], ADD_USAGE)?;
    let [kind, amount, category, description @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    if description.is_empty() {
        return Err(CommandError::usage(ADD_USAGE));
    }

    let kind: TransactionKind = parse_value(kind, "type")?;
    let amount: f64 = parse_value(amount, "amount")?;
    let mut input = NewTransaction::new(
        description.join(" "),
        amount,
        normalize_category(category),
        kind,
    );
    if let Some(raw) = parsed.option("--date") {
        input = input.on(parse_date(raw)?);
    }
    Ok(input)
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("Invalid date `{raw}` (expected YYYY-MM-DD)"))
    })
}

/// Known categories match case-insensitively; anything else is kept as typed.
fn normalize_category(raw: &str) -> Category {
    let trimmed = raw.trim();
    Category::KNOWN
        .iter()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .map(|known| Category::new(*known))
        .unwrap_or_else(|| Category::new(trimmed))
}

fn prompt_new_transaction(context: &ShellContext) -> Result<NewTransaction, CommandError> {
    let theme = &context.theme;
    let kinds = [TransactionKind::Expense, TransactionKind::Income];
    let kind_items: Vec<String> = kinds.iter().map(|kind| kind_label(*kind).to_string()).collect();
    let kind = kinds[cli_io::select(theme, "Type", &kind_items)?];

    let description = cli_io::prompt_text(theme, "Description")?;
    let amount: f64 = cli_io::prompt_parsed(theme, "Amount", None)?;

    let categories: Vec<Category> = Category::known().collect();
    let category_items: Vec<String> = categories.iter().map(category_label).collect();
    let category = categories[cli_io::select(theme, "Category", &category_items)?].clone();

    let date: NaiveDate = cli_io::prompt_parsed(theme, "Date", Some(context.ledger.today()))?;
    Ok(NewTransaction::new(description, amount, category, kind).on(date))
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = CommandArgs::parse(args, &[], DELETE_USAGE)?;
    let [raw_id] = parsed.positional.as_slice() else {
        return Err(CommandError::usage(DELETE_USAGE));
    };
    let id: TransactionId = parse_value(raw_id, "id")?;

    let Some(txn) = context.ledger.transaction(id) else {
        output::warning(format!("No transaction with id {id}."));
        return Ok(());
    };
    let prompt = format!(
        "Delete \"{}\" ({})?",
        txn.description,
        format_signed(context.currency(), txn.amount)
    );
    if !context.confirm(&prompt, parsed.flags())? {
        output::info("Delete cancelled.");
        return Ok(());
    }

    match context.ledger.delete_transaction(id)? {
        LedgerEvent::TransactionDeleted { removed: true, .. } => {
            output::success(format!("Deleted transaction {id}."));
        }
        _ => output::warning(format!("No transaction with id {id}.")),
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.ledger.is_empty() {
        output::info("There are no transactions to clear.");
        return Ok(());
    }
    let prompt = format!("Delete all {} transaction(s)?", context.ledger.len());
    if !context.confirm(&prompt, args)? {
        output::info("Clear cancelled.");
        return Ok(());
    }
    if let LedgerEvent::Cleared { removed } = context.ledger.clear_all()? {
        output::success(format!("Cleared {removed} transaction(s)."));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = CommandArgs::parse(args, &["--type", "--category"], LIST_USAGE)?;
    if !parsed.positional.is_empty() {
        return Err(CommandError::usage(LIST_USAGE));
    }
    let filter = TransactionFilter::parse(
        parsed.option("--type").unwrap_or(MATCH_ALL),
        parsed.option("--category").unwrap_or(MATCH_ALL),
    )?;

    let matches = context.ledger.filter(&filter);
    if matches.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    output::block(render_list(&matches, context.currency()));
    output::info(format!("{} transaction(s)", matches.len()));
    Ok(())
}

pub(crate) fn render_list(transactions: &[&Transaction], currency: &str) -> String {
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max(32),
        TableColumn::left("Category"),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
    ]);
    for txn in transactions {
        table.push_row(vec![
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            category_label(&txn.category),
            kind_label(txn.kind).to_string(),
            format_signed(currency, txn.amount),
        ]);
    }
    table.render()
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let in_use = context.ledger.categories_in_use();
    output::section("Categories");
    for category in Category::known() {
        let marker = if in_use.contains(&category) { "*" } else { " " };
        output::block(format!(
            "  {marker} {:<10} {}",
            category.as_str(),
            category_label(&category)
        ));
    }
    for category in in_use.iter().filter(|category| !category.is_known()) {
        output::block(format!(
            "  * {:<10} {}",
            category.as_str(),
            category_label(category)
        ));
    }
    output::hint(format!(
        "`*` marks categories in use. Spending this month: {}.",
        format_amount(
            context.currency(),
            context.ledger.monthly_budget_usage(context.ledger.today()).monthly_expenses
        )
    ));
    Ok(())
}
