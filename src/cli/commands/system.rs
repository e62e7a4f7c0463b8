use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(word) => match context.registry.resolve(&word.to_lowercase()) {
            Some(entry) => output::block(command_help(entry)),
            None => context.suggest_command(word),
        },
        None => output::block(overview(&context.registry)),
    }
    Ok(())
}

fn overview(registry: &CommandRegistry) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        registry
            .list()
            .map(|entry| format!("  {:<12} {}", entry.name, entry.description)),
    );
    lines.push("Use `help <command>` for usage details.".to_string());
    lines.join("\n")
}

fn command_help(entry: &CommandEntry) -> String {
    let mut text = format!("{}\n  Usage: {}", entry.description, entry.usage);
    if !entry.aliases.is_empty() {
        text.push_str(&format!("\n  Aliases: {}", entry.aliases.join(", ")));
    }
    text
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
