use std::path::Path;

use tally_core::LedgerEvent;
use tally_storage_json::{load_snapshot_from_path, save_snapshot_to_path};

use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};

use super::CommandArgs;

const EXPORT_USAGE: &str = "export <path>";
const IMPORT_USAGE: &str = "import <path> [--yes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write the ledger to a JSON snapshot",
            EXPORT_USAGE,
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace the ledger with a JSON snapshot",
            IMPORT_USAGE,
            cmd_import,
        ),
        CommandEntry::new(
            "save",
            "Write the ledger to storage again after a failed save",
            "save",
            cmd_save,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::usage(EXPORT_USAGE));
    };
    let path = Path::new(path);
    save_snapshot_to_path(context.ledger.state(), path)?;
    output::success(format!(
        "Exported {} transaction(s) to {}.",
        context.ledger.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = CommandArgs::parse(args, &[], IMPORT_USAGE)?;
    let [path] = parsed.positional.as_slice() else {
        return Err(CommandError::usage(IMPORT_USAGE));
    };
    let path = Path::new(path);
    let state = load_snapshot_from_path(path)?;

    if !context.ledger.is_empty() {
        let prompt = format!(
            "Replace {} transaction(s) with {} from {}?",
            context.ledger.len(),
            state.transactions.len(),
            path.display()
        );
        if !context.confirm(&prompt, parsed.flags())? {
            output::info("Import cancelled.");
            return Ok(());
        }
    }

    if let LedgerEvent::Replaced { transactions } = context.ledger.replace_state(state)? {
        output::success(format!("Imported {transactions} transaction(s)."));
    }
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.ledger.persist()?;
    output::success("Ledger saved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::test_support::script_context;
    use crate::cli::shell::handle_line;

    #[test]
    fn export_then_import_restores_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("backup.json");
        let file_arg = file.to_str().unwrap();

        let mut source = script_context();
        handle_line(&mut source, "add expense 12 food Lunch").unwrap();
        handle_line(&mut source, "budget 250").unwrap();
        handle_line(&mut source, &format!("export {file_arg}")).unwrap();

        let mut target = script_context();
        handle_line(&mut target, "add income 1 other Stale").unwrap();
        handle_line(&mut target, &format!("import {file_arg} --yes")).unwrap();
        assert_eq!(target.ledger.state(), source.ledger.state());
    }

    #[test]
    fn import_of_missing_file_is_a_persistence_error() {
        let mut context = script_context();
        let err = handle_line(&mut context, "import /nonexistent/tally.json").unwrap_err();
        assert!(matches!(err, CommandError::Core(ref core) if core.is_persistence()));
        assert!(handle_line(&mut context, "export").is_err());
        handle_line(&mut context, "save").unwrap();
    }
}
