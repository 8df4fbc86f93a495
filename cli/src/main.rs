#![allow(clippy::exit)]

//! `roster`: terminal console for a remote user directory.

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod timing;

use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::FileConfig;
use crate::context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with timing support
    timing::init_tracing(cli.verbose, cli.timing);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        return commands::write_completions(shell, &mut std::io::stdout());
    }

    let config = FileConfig::load(cli.api.config.as_deref())?.resolve(&cli.api);
    info!(api = %config.api_base_url, per_page = config.per_page, "resolved configuration");
    let mut app = AppContext::new(config);

    let result = match command {
        Commands::List { page, interactive } => commands::run_list(&app, page, interactive).await,
        Commands::Show { id } => commands::run_show(&app, id).await,
        Commands::Create { fields } => commands::run_create(&app, fields).await,
        Commands::Update { id, fields } => commands::run_update(&app, id, fields).await,
        Commands::Delete { id, page, yes } => commands::run_delete(&app, id, page, yes).await,
        Commands::Console => commands::run_console(&mut app).await,
        Commands::Completions { .. } => Ok(()),
    };

    app.shutdown();
    result
}
