//! Create user command.

use anyhow::Result;
use roster_business::CommandKind;
use tracing::{info, instrument};

use crate::cli::UserFields;
use crate::commands::prompts::complete_fields;
use crate::commands::{exit_with_error, report_write};
use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "create")]
pub async fn run_create(app: &AppContext, fields: UserFields) -> Result<()> {
    let out = Output::new();

    let draft = complete_fields(&fields)?;
    if let Err(err) = draft.validate() {
        exit_with_error(app, &out, format!("Invalid user: {err}"));
    }
    info!(email = %draft.email, "creating user");

    let name = format!("{} {}", draft.first_name, draft.last_name);
    let state = match app.users.create(draft).await {
        Ok(state) => state,
        Err(err) => exit_with_error(app, &out, format!("Create not started: {err}")),
    };

    if !report_write(&out, &state, CommandKind::Create, format!("Created {name}")) {
        exit_with_error(app, &out, "Create failed");
    }

    out.newline();
    out.users_page(&state);
    Ok(())
}
