//! Update user command.
//!
//! Loads the record first so fields not given on the command line keep their
//! current values.

use anyhow::Result;
use roster_business::{CommandKind, UserDetailStatus};
use tracing::{info, instrument};

use crate::cli::UserFields;
use crate::commands::prompts::{edit_draft, overlay};
use crate::commands::{exit_with_error, report_write};
use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "update", fields(user_id = id))]
pub async fn run_update(app: &AppContext, id: u64, fields: UserFields) -> Result<()> {
    let out = Output::new();

    let loaded = app.detail.load(id).await;
    let current = match loaded.status() {
        UserDetailStatus::Loaded(user) => user.clone(),
        UserDetailStatus::NotFound { id } => {
            exit_with_error(app, &out, format!("User not found: {id}"))
        }
        UserDetailStatus::Failed(message) => {
            exit_with_error(app, &out, format!("Error loading user {id}: {message}"))
        }
        UserDetailStatus::Idle | UserDetailStatus::Loading { .. } => {
            exit_with_error(app, &out, "User lookup did not complete")
        }
    };

    let base = current.to_draft();
    let draft = if fields.is_empty() {
        edit_draft(&base)?
    } else {
        overlay(&fields, &base)
    };
    if let Err(err) = draft.validate() {
        exit_with_error(app, &out, format!("Invalid user: {err}"));
    }
    if draft == base {
        out.dim("Nothing changed.");
        return Ok(());
    }

    let record = current.with_draft(&draft);
    info!(user_id = id, "updating user");
    let state = match app.users.update(record.clone()).await {
        Ok(state) => state,
        Err(err) => exit_with_error(app, &out, format!("Update not started: {err}")),
    };

    if !report_write(
        &out,
        &state,
        CommandKind::Update,
        format!("Updated user {id}"),
    ) {
        exit_with_error(app, &out, "Update failed");
    }

    app.detail.apply_local_edit(record);
    if let Some(user) = app.detail.snapshot().status().user() {
        out.newline();
        out.user_detail(user);
    }
    Ok(())
}
