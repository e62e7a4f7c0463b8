use std::fmt::Display;
use std::str::FromStr;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::errors::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt the user for free-form text input, rejecting blank answers.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt for a parsed value, pre-filled with `default`.
pub fn prompt_parsed<T>(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<T>,
) -> Result<T, CommandError>
where
    T: Clone + Display + FromStr,
    T::Err: Display,
{
    let mut input = Input::<T>::with_theme(theme).with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value);
    }
    input.interact_text().map_err(CommandError::from)
}

/// Let the user pick one of `items`; returns the chosen index.
pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CommandError::from)
}
