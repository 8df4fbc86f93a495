//! Delete user command.

use anyhow::{Context as _, Result};
use inquire::Confirm;
use roster_business::CommandKind;
use tracing::{info, instrument};

use crate::commands::{exit_with_error, report_write};
use crate::context::AppContext;
use crate::output::{Output, failure_text};

/// Deletes user `id`.
///
/// With `page`, that page is loaded first so the reload afterwards lands on
/// the page the user was listed on (or the one before it, when the user was
/// the page's only entry).
#[instrument(skip_all, name = "delete", fields(user_id = id, page = ?page))]
pub async fn run_delete(app: &AppContext, id: u64, page: Option<u32>, yes: bool) -> Result<()> {
    let out = Output::new();

    if let Some(page) = page {
        let state = app.users.fetch(Some(page)).await;
        if let Some(message) = failure_text(&state) {
            exit_with_error(app, &out, message);
        }
        if state.find(id).is_none() {
            out.warning(format!("User {id} is not listed on page {page}"));
        }
    }

    if !yes {
        let confirmed = Confirm::new(&format!("Delete user {id}?"))
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;
        if !confirmed {
            out.dim("Cancelled.");
            return Ok(());
        }
    }

    info!(user_id = id, "deleting user");
    let state = match app.users.delete(id).await {
        Ok(state) => state,
        Err(err) => exit_with_error(app, &out, format!("Delete not started: {err}")),
    };

    if !report_write(
        &out,
        &state,
        CommandKind::Delete,
        format!("Deleted user {id}"),
    ) {
        exit_with_error(app, &out, "Delete failed");
    }

    out.newline();
    out.users_page(&state);
    Ok(())
}
