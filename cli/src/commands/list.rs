//! List users command.

use anyhow::Result;
use tracing::instrument;

use crate::commands::prompts::pick_user;
use crate::commands::{exit_with_error, run_show};
use crate::context::AppContext;
use crate::output::{Output, failure_text};

#[instrument(skip_all, name = "list", fields(page = page, interactive = interactive))]
pub async fn run_list(app: &AppContext, page: u32, interactive: bool) -> Result<()> {
    let out = Output::new();

    let state = app.users.fetch(Some(page)).await;
    if let Some(message) = failure_text(&state) {
        exit_with_error(app, &out, message);
    }

    if interactive && !state.records().is_empty() {
        out.dim(crate::output::page_summary_text(&state));
        if let Some(user) = pick_user("Select user to view:", state.records())? {
            out.newline();
            return run_show(app, user.id).await;
        }
        return Ok(());
    }

    out.newline();
    out.users_page(&state);
    if state.has_next_page() {
        out.dim(format!(
            "Next page: roster list --page {}",
            state.current_page() + 1
        ));
    }
    Ok(())
}
