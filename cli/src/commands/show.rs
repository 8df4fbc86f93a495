//! Show a single user command.

use anyhow::Result;
use roster_business::UserDetailStatus;
use tracing::instrument;

use crate::commands::exit_with_error;
use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "show", fields(user_id = id))]
pub async fn run_show(app: &AppContext, id: u64) -> Result<()> {
    let out = Output::new();

    let state = app.detail.load(id).await;
    match state.status() {
        UserDetailStatus::Loaded(user) => {
            out.user_detail(user);
            Ok(())
        }
        UserDetailStatus::NotFound { id } => {
            exit_with_error(app, &out, format!("User not found: {id}"))
        }
        UserDetailStatus::Failed(message) => {
            exit_with_error(app, &out, format!("Error loading user {id}: {message}"))
        }
        UserDetailStatus::Idle | UserDetailStatus::Loading { .. } => {
            exit_with_error(app, &out, "User lookup did not complete")
        }
    }
}
