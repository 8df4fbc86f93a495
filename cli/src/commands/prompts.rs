//! Interactive prompts shared by the commands and the console.

use std::fmt;

use anyhow::{Context as _, Result};
use inquire::{Select, Text};
use roster_business::{UserDraft, UserRecord};

use crate::cli::UserFields;

/// A user as shown in a selection list.
pub struct UserChoice(pub UserRecord);

impl fmt::Display for UserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> [#{}]",
            self.0.full_name(),
            self.0.email,
            self.0.id
        )
    }
}

/// Let the user pick one of `users`. `None` when skipped with Esc.
pub fn pick_user(message: &str, users: &[UserRecord]) -> Result<Option<UserRecord>> {
    let options: Vec<UserChoice> = users.iter().cloned().map(UserChoice).collect();

    let selection = Select::new(message, options)
        .with_help_message("Use arrow keys to navigate, Enter to select, Esc to go back")
        .prompt_skippable()
        .context("Failed to select user")?;

    Ok(selection.map(|choice| choice.0))
}

fn ask(label: &str, initial: Option<&str>) -> Result<String> {
    let mut prompt = Text::new(label);
    if let Some(initial) = initial {
        prompt = prompt.with_initial_value(initial);
    }
    let value = prompt
        .prompt()
        .with_context(|| format!("Failed to read {}", label.trim_end_matches(':')))?;
    Ok(value.trim().to_owned())
}

/// Fields given on the command line, prompting for the rest.
pub fn complete_fields(fields: &UserFields) -> Result<UserDraft> {
    let first_name = match &fields.first_name {
        Some(value) => value.clone(),
        None => ask("First name:", None)?,
    };
    let last_name = match &fields.last_name {
        Some(value) => value.clone(),
        None => ask("Last name:", None)?,
    };
    let email = match &fields.email {
        Some(value) => value.clone(),
        None => ask("Email:", None)?,
    };
    Ok(UserDraft::new(first_name, last_name, email))
}

/// Prompt for every field, starting from `base`.
pub fn edit_draft(base: &UserDraft) -> Result<UserDraft> {
    Ok(UserDraft::new(
        ask("First name:", Some(&base.first_name))?,
        ask("Last name:", Some(&base.last_name))?,
        ask("Email:", Some(&base.email))?,
    ))
}

/// `base` with every field given in `fields` replaced.
pub fn overlay(fields: &UserFields, base: &UserDraft) -> UserDraft {
    UserDraft::new(
        fields
            .first_name
            .clone()
            .unwrap_or_else(|| base.first_name.clone()),
        fields
            .last_name
            .clone()
            .unwrap_or_else(|| base.last_name.clone()),
        fields.email.clone().unwrap_or_else(|| base.email.clone()),
    )
}
