//! Interactive console: log in, then page through and edit users.
//!
//! The login screen is a placeholder gate. It compares against the configured
//! pair and nothing else; the stores never look at it.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use roster_business::{CommandKind, StoreError, UserStoreState};
use tracing::{info, instrument};

use crate::cli::UserFields;
use crate::commands::prompts::{complete_fields, edit_draft, pick_user};
use crate::commands::report_write;
use crate::context::AppContext;
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    NextPage,
    PreviousPage,
    Reload,
    View,
    Create,
    Edit,
    Delete,
    Logout,
    Quit,
}

impl fmt::Display for ConsoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NextPage => "Next page",
            Self::PreviousPage => "Previous page",
            Self::Reload => "Reload",
            Self::View => "View a user",
            Self::Create => "Create a user",
            Self::Edit => "Edit a user",
            Self::Delete => "Delete a user",
            Self::Logout => "Log out",
            Self::Quit => "Quit",
        })
    }
}

/// Menu entries that make sense for the cached page.
pub fn available_actions(state: &UserStoreState) -> Vec<ConsoleAction> {
    let mut actions = Vec::with_capacity(9);
    if state.has_next_page() {
        actions.push(ConsoleAction::NextPage);
    }
    if state.has_previous_page() {
        actions.push(ConsoleAction::PreviousPage);
    }
    actions.push(ConsoleAction::Reload);
    if !state.records().is_empty() {
        actions.extend([ConsoleAction::View, ConsoleAction::Edit]);
    }
    actions.push(ConsoleAction::Create);
    if !state.records().is_empty() {
        actions.push(ConsoleAction::Delete);
    }
    actions.extend([ConsoleAction::Logout, ConsoleAction::Quit]);
    actions
}

enum SessionEnd {
    Logout,
    Quit,
}

#[instrument(skip_all, name = "console")]
pub async fn run_console(app: &mut AppContext) -> Result<()> {
    let out = Output::new();
    out.header("Roster console");
    out.dim(format!("Connected to {}", app.config.api_base_url));

    loop {
        out.newline();
        if !login(app, &out)? {
            break;
        }

        match session(app, &out).await? {
            SessionEnd::Logout => {
                app.login.logout();
                out.info("Logged out.");
            }
            SessionEnd::Quit => break,
        }
    }

    out.dim("Bye.");
    Ok(())
}

/// Returns `false` when the user backs out with Esc.
fn login(app: &mut AppContext, out: &Output) -> Result<bool> {
    loop {
        let Some(username) = Text::new("Username:")
            .with_help_message("Esc to quit")
            .prompt_skippable()
            .context("Failed to read username")?
        else {
            return Ok(false);
        };

        let Some(password) = Password::new("Password:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt_skippable()
            .context("Failed to read password")?
        else {
            return Ok(false);
        };

        if app.login.attempt(username.trim(), &password) {
            out.success(format!("Logged in as {}", username.trim()));
            return Ok(true);
        }
        if let Some(message) = app.login.status().error() {
            out.error(message);
        }
    }
}

async fn session(app: &AppContext, out: &Output) -> Result<SessionEnd> {
    let mut state = app.users.fetch(Some(1)).await;

    loop {
        out.newline();
        out.users_page(&state);
        out.store_failure(&state);

        let Some(action) = Select::new("What next?", available_actions(&state))
            .prompt_skippable()
            .context("Failed to read action")?
        else {
            return Ok(SessionEnd::Quit);
        };
        info!(%action, page = state.current_page(), "console action");

        state = match action {
            ConsoleAction::NextPage => app.users.fetch(Some(state.current_page() + 1)).await,
            ConsoleAction::PreviousPage => {
                let previous = state.current_page().saturating_sub(1).max(1);
                app.users.fetch(Some(previous)).await
            }
            ConsoleAction::Reload => app.users.fetch(None).await,
            ConsoleAction::View => {
                view(app, out, &state).await?;
                state
            }
            ConsoleAction::Create => create(app, out).await?.unwrap_or(state),
            ConsoleAction::Edit => edit(app, out, &state).await?.unwrap_or(state),
            ConsoleAction::Delete => delete(app, out, &state).await?.unwrap_or(state),
            ConsoleAction::Logout => return Ok(SessionEnd::Logout),
            ConsoleAction::Quit => return Ok(SessionEnd::Quit),
        };
    }
}

async fn view(app: &AppContext, out: &Output, state: &UserStoreState) -> Result<()> {
    let Some(user) = pick_user("Select user to view:", state.records())? else {
        return Ok(());
    };

    let detail = app.detail.load(user.id).await;
    out.newline();
    match detail.status().user() {
        Some(user) => out.user_detail(user),
        None => out.error(
            detail
                .status()
                .error_message()
                .map_or_else(|| format!("User not found: {}", user.id), str::to_owned),
        ),
    }
    Ok(())
}

/// Report a write outcome; `None` when nothing ran.
fn finish_write(
    out: &Output,
    result: Result<Arc<UserStoreState>, StoreError>,
    kind: CommandKind,
    done: String,
) -> Option<Arc<UserStoreState>> {
    match result {
        Ok(state) => {
            report_write(out, &state, kind, done);
            Some(state)
        }
        Err(err) => {
            out.error(format!("The {kind} was not started: {err}"));
            None
        }
    }
}

async fn create(app: &AppContext, out: &Output) -> Result<Option<Arc<UserStoreState>>> {
    let draft = complete_fields(&UserFields::default())?;
    if let Err(err) = draft.validate() {
        out.error(format!("Invalid user: {err}"));
        return Ok(None);
    }

    let done = format!("Created {} {}", draft.first_name, draft.last_name);
    let result = app.users.create(draft).await;
    Ok(finish_write(out, result, CommandKind::Create, done))
}

async fn edit(
    app: &AppContext,
    out: &Output,
    state: &UserStoreState,
) -> Result<Option<Arc<UserStoreState>>> {
    let Some(user) = pick_user("Select user to edit:", state.records())? else {
        return Ok(None);
    };

    let base = user.to_draft();
    let draft = edit_draft(&base)?;
    if let Err(err) = draft.validate() {
        out.error(format!("Invalid user: {err}"));
        return Ok(None);
    }
    if draft == base {
        out.dim("Nothing changed.");
        return Ok(None);
    }

    let result = app.users.update(user.with_draft(&draft)).await;
    Ok(finish_write(
        out,
        result,
        CommandKind::Update,
        format!("Updated user {}", user.id),
    ))
}

async fn delete(
    app: &AppContext,
    out: &Output,
    state: &UserStoreState,
) -> Result<Option<Arc<UserStoreState>>> {
    let Some(user) = pick_user("Select user to delete:", state.records())? else {
        return Ok(None);
    };

    let confirmed = Confirm::new(&format!("Delete {}?", user.full_name()))
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")?;
    if !confirmed {
        return Ok(None);
    }

    let result = app.users.delete(user.id).await;
    Ok(finish_write(
        out,
        result,
        CommandKind::Delete,
        format!("Deleted user {}", user.id),
    ))
}
