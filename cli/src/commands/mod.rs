//! Command implementations for the roster CLI.
//!
//! Each subcommand is implemented in its own module; `prompts` holds the
//! interactive pieces they share.

pub mod completions;
pub mod console;
pub mod create;
pub mod delete;
pub mod list;
pub mod prompts;
pub mod show;
pub mod update;

use std::fmt::Display;

use roster_business::{CommandKind, RequestStatus, UserStoreState};

pub use completions::write_completions;
pub use console::run_console;
pub use create::run_create;
pub use delete::run_delete;
pub use list::run_list;
pub use show::run_show;
pub use update::run_update;

use crate::context::AppContext;
use crate::output::Output;

/// Print `message` as an error and exit with status 1.
pub(crate) fn exit_with_error(app: &AppContext, out: &Output, message: impl Display) -> ! {
    out.error(message);
    app.shutdown();
    std::process::exit(1);
}

/// Report how a write of `kind` ended.
///
/// A write that succeeded but whose page reload failed still counts as done;
/// only a failure of the write itself returns `false`.
pub(crate) fn report_write(
    out: &Output,
    state: &UserStoreState,
    kind: CommandKind,
    done: impl Display,
) -> bool {
    if state.request_status() != RequestStatus::Failed {
        out.success(done);
        return true;
    }

    if state.last_command() == Some(kind) {
        out.store_failure(state);
        false
    } else {
        out.success(done);
        out.warning(format!(
            "Reloading the page failed: {}",
            state.last_error().unwrap_or("unknown error")
        ));
        true
    }
}
