//! Terminal output utilities for styled CLI output.
//!
//! Commands print through [`Output`] instead of calling `println!` directly.
//! The `*_text` functions build the strings so they can be tested without a
//! terminal.

use std::fmt::Display;

use console::{Term, style};
use roster_business::{RequestStatus, UserRecord, UserStoreState};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper writing to stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    /// Print a success message with a green checkmark.
    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✓").green().bold(), message));
    }

    /// Print an error message with a red X.
    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✗").red().bold(), message));
    }

    /// Print a warning message with a yellow warning sign.
    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {}", style("⚠").yellow().bold(), message));
    }

    /// Print an info message with a blue info icon.
    pub fn info(&self, message: impl Display) {
        self.line(&format!("{} {}", style("ℹ").blue().bold(), message));
    }

    /// Print a plain message without any prefix.
    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    /// Print an empty line.
    pub fn newline(&self) {
        self.line("");
    }

    /// Print a header with emphasis.
    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    /// Print a dim/muted message.
    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Print a labeled value with indentation.
    pub fn labeled_indent(&self, label: impl Display, value: impl Display, indent: usize) {
        let spaces = " ".repeat(indent);
        self.line(&format!("{spaces}{}: {}", style(label).dim(), value));
    }

    /// Print the cached page as a table followed by its pagination footer.
    pub fn users_page(&self, state: &UserStoreState) {
        if state.records().is_empty() {
            self.dim(format!("No users on page {}.", state.current_page()));
        } else {
            self.print(users_table_text(state.records()));
        }
        self.dim(page_summary_text(state));
    }

    /// Print one user as labeled fields.
    pub fn user_detail(&self, user: &UserRecord) {
        self.header(user.full_name());
        self.labeled_indent("ID", user.id, 2);
        self.labeled_indent("Email", &user.email, 2);
        if !user.avatar.is_empty() {
            self.labeled_indent("Avatar", &user.avatar, 2);
        }
    }

    /// Print the store's last error, if the last command failed.
    pub fn store_failure(&self, state: &UserStoreState) {
        if let Some(message) = failure_text(state) {
            self.error(message);
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}

pub fn users_table_text(users: &[UserRecord]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|user| UserRow {
            id: user.id,
            name: truncate_str(&user.full_name(), 28),
            email: truncate_str(&user.email, 32),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

/// `Page 2 of 3 · 13 user(s)`, plus `· delete in progress` while a command
/// is still waiting on the remote.
pub fn page_summary_text(state: &UserStoreState) -> String {
    let summary = format!(
        "Page {} of {} · {} user(s)",
        state.current_page(),
        state.total_pages(),
        state.total_records()
    );
    match state.in_flight() {
        Some(kind) => format!("{summary} · {kind} in progress"),
        None => summary,
    }
}

/// Message for a failed last command, `None` otherwise.
pub fn failure_text(state: &UserStoreState) -> Option<String> {
    if state.request_status() != RequestStatus::Failed {
        return None;
    }
    let command = state
        .last_command()
        .map_or_else(|| "request".to_owned(), |kind| kind.to_string());
    let message = state.last_error().unwrap_or("unknown error");
    Some(format!("The {command} failed: {message}"))
}
