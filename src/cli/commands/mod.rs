pub mod budget;
pub mod config;
pub mod report;
pub mod snapshot;
pub mod system;
pub mod transaction;

use std::str::FromStr;

use crate::cli::errors::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups: [fn() -> Vec<CommandEntry>; 6] = [
        transaction::definitions,
        budget::definitions,
        report::definitions,
        snapshot::definitions,
        config::definitions,
        system::definitions,
    ];
    for entry in groups.into_iter().flat_map(|definitions| definitions()) {
        registry.register(entry);
    }
}

/// Positional words plus `--name value` options and bare `--flag`s.
#[derive(Debug, Default)]
pub(crate) struct CommandArgs<'a> {
    pub positional: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
    flags: Vec<&'a str>,
}

impl<'a> CommandArgs<'a> {
    /// `valued` names the options that take a value; any other `--word` or
    /// `-y` is a flag.
    pub fn parse(args: &[&'a str], valued: &[&str], usage: &str) -> Result<Self, CommandError> {
        let mut parsed = Self::default();
        let mut words = args.iter().copied();
        while let Some(word) = words.next() {
            if valued.contains(&word) {
                let value = words.next().ok_or_else(|| CommandError::usage(usage))?;
                parsed.options.push((word, value));
            } else if word.starts_with("--") || word == "-y" {
                parsed.flags.push(word);
            } else {
                parsed.positional.push(word);
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn flags(&self) -> &[&'a str] {
        &self.flags
    }
}

/// Parses one argument, naming it in the error.
pub(crate) fn parse_value<T: FromStr>(raw: &str, what: &str) -> Result<T, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid {what} `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_options_flags_and_words() {
        let args = ["lunch", "--date", "2024-04-02", "--yes", "out"];
        let parsed = CommandArgs::parse(&args, &["--date"], "x").unwrap();
        assert_eq!(parsed.positional, ["lunch", "out"]);
        assert_eq!(parsed.option("--date"), Some("2024-04-02"));
        assert_eq!(parsed.flags(), ["--yes"]);
    }

    #[test]
    fn option_without_value_is_a_usage_error() {
        let err = CommandArgs::parse(&["--type"], &["--type"], "list [--type T]").unwrap_err();
        assert_eq!(err.to_string(), "Usage: list [--type T]");
    }

    #[test]
    fn parse_value_reports_the_raw_input() {
        let err = parse_value::<f64>("ten", "amount").unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount `ten`");
        assert_eq!(parse_value::<f64>(" 2.5 ", "amount").unwrap(), 2.5);
    }
}
