use std::collections::HashMap;

use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;

pub type CommandResult = Result<(), CommandError>;
pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// A shell command and the words that invoke it.
pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations never shadow an existing name or alias.
    pub fn register(&mut self, entry: CommandEntry) {
        let slot = self.entries.len();
        for word in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
            self.lookup.entry(word).or_insert(slot);
        }
        self.entries.push(entry);
    }

    pub fn resolve(&self, word: &str) -> Option<&CommandEntry> {
        self.lookup.get(word).map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Every invocable word, aliases included.
    pub fn words(&self) -> Vec<&'static str> {
        let mut words: Vec<_> = self.lookup.keys().copied().collect();
        words.sort_unstable();
        words
    }
}
