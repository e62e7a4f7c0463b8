use std::{env, path::PathBuf};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tally_config::{Config, ConfigManager};
use tally_core::{Clock, CoreError, FixedClock, Ledger, SystemClock};
use tally_storage_json::JsonFileStore;
use tracing::{debug, warn};

use super::commands;
use super::errors::{CliError, CommandError};
use super::io as cli_io;
use super::output;
use super::registry::{CommandRegistry, CommandResult};

/// Base directory for config and data, overriding the per-user locations.
pub const HOME_ENV: &str = "TALLY_HOME";
/// Pins "today" to a `YYYY-MM-DD` date.
pub const TODAY_ENV: &str = "TALLY_TODAY";

const DATA_DIR_NAME: &str = "data";
const YES_FLAGS: [&str; 2] = ["--yes", "-y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub config: Config,
    config_manager: Option<ConfigManager>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let (config_manager, default_data_dir) = match env::var_os(HOME_ENV) {
            Some(home) => {
                let home = PathBuf::from(home);
                (
                    ConfigManager::with_base_dir(home.clone())?,
                    Some(home.join(DATA_DIR_NAME)),
                )
            }
            None => (ConfigManager::for_user()?, None),
        };
        let config = config_manager.load()?;
        let data_dir = match (&config.data_dir, default_data_dir) {
            (Some(custom), _) => custom.clone(),
            (None, Some(dir)) => dir,
            (None, None) => config.resolve_data_dir(),
        };
        debug!(
            config = %config_manager.config_path().display(),
            data = %data_dir.display(),
            "resolved paths"
        );

        let store = JsonFileStore::new(data_dir)?;
        let ledger = Ledger::open(Box::new(store), clock_from_env())?;

        let context = Self::from_parts(mode, ledger, config).with_config_manager(config_manager);
        for warning in context.ledger.load_warnings() {
            output::warning(warning);
        }
        Ok(context)
    }

    /// Context over an already opened ledger; nothing is read from disk.
    pub fn from_parts(mode: CliMode, ledger: Ledger, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_color_enabled(mode == CliMode::Interactive && config.ui_color_enabled);

        Self {
            mode,
            registry,
            ledger,
            config,
            config_manager: None,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    /// Writes the current config back; sessions built from parts keep it in memory.
    pub(crate) fn persist_config(&self) -> CommandResult {
        match &self.config_manager {
            Some(manager) => Ok(manager.save(&self.config)?),
            None => Ok(()),
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Asks before a destructive action unless `--yes` was passed, the
    /// session is scripted or confirmations are turned off.
    pub(crate) fn confirm(&self, prompt: &str, args: &[&str]) -> Result<bool, CommandError> {
        if args.iter().any(|arg| YES_FLAGS.contains(arg))
            || !self.can_prompt()
            || !self.config.confirm_destructive
        {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.words()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.resolve(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let best = self
            .registry
            .words()
            .into_iter()
            .map(|word| (levenshtein(word, input), word))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, word)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{word}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit tally?")
    }

    /// Reports a failed command; only terminal failures end the loop.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::Validation(message)) => {
                output::error(format!("Invalid input: {message}"));
            }
            CommandError::Core(err @ CoreError::Persistence(_)) => {
                warn!(error = %err, "change kept in memory only");
                output::error(err);
                output::hint("The change is kept for this session. Run `save` to retry.");
            }
            other => output::error(other),
        }
    }
}

fn clock_from_env() -> Box<dyn Clock> {
    match env::var(TODAY_ENV) {
        Ok(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Box::new(FixedClock::on(date)),
            Err(err) => {
                output::warning(format!("Ignoring {TODAY_ENV}={raw}: {err}"));
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}
