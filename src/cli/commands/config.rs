use std::path::PathBuf;

use crate::cli::context::{CliMode, ShellContext};
use crate::cli::errors::CommandError;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};

const USAGE: &str = "config [show | set <currency|color|confirm|data_dir> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))?;
            context.persist_config()?;
            output::success(format!("Updated `{key}`."));
            Ok(())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let data_dir = config
        .data_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "(default)".into());
    output::section("Configuration");
    output::block(format!("  currency  {}", config.currency_symbol));
    output::block(format!("  color     {}", on_off(config.ui_color_enabled)));
    output::block(format!("  confirm   {}", on_off(config.confirm_destructive)));
    output::block(format!("  data_dir  {data_dir}"));
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn parse_switch(raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "Invalid switch `{raw}` (use on or off)"
        ))),
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    match key.to_ascii_lowercase().as_str() {
        "currency" => {
            if value.trim().is_empty() {
                return Err(CommandError::InvalidArguments(
                    "Currency symbol cannot be empty".into(),
                ));
            }
            context.config.currency_symbol = value.trim().to_string();
        }
        "color" => {
            let enabled = parse_switch(value)?;
            context.config.ui_color_enabled = enabled;
            output::set_color_enabled(enabled && context.mode == CliMode::Interactive);
        }
        "confirm" => context.config.confirm_destructive = parse_switch(value)?,
        "data_dir" => {
            context.config.data_dir = Some(PathBuf::from(value.trim()));
            output::hint("The new data directory is used from the next start.");
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown config key `{other}`"
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::context::test_support::script_context;
    use crate::cli::shell::handle_line;

    #[test]
    fn set_updates_the_session_config() {
        let mut context = script_context();
        handle_line(&mut context, "config set currency €").unwrap();
        handle_line(&mut context, "config set confirm off").unwrap();
        assert_eq!(context.config.currency_symbol, "€");
        assert!(!context.config.confirm_destructive);

        assert!(handle_line(&mut context, "config set confirm maybe").is_err());
        assert!(handle_line(&mut context, "config set theme dark").is_err());
        assert!(handle_line(&mut context, "config set currency").is_err());
        handle_line(&mut context, "config").unwrap();
    }
}
