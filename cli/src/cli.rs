use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Console for a remote user directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Connection settings. Each one overrides the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ApiArgs {
    /// Config file to read instead of the default location
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the users API
    #[arg(long, global = true, env = "ROSTER_API_URL")]
    pub api_url: Option<String>,

    /// Value sent in the x-api-key header
    #[arg(long, global = true, env = "ROSTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Records requested per page
    #[arg(long, global = true, env = "ROSTER_PER_PAGE")]
    pub per_page: Option<u32>,
}

/// Field values given on the command line for create/update.
#[derive(Args, Debug, Default, Clone)]
pub struct UserFields {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

impl UserFields {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of users
    List {
        /// Page to load
        #[arg(long, short = 'p', default_value = "1")]
        page: u32,

        /// Interactive mode (select a user to view)
        #[arg(long, short = 'I')]
        interactive: bool,
    },
    /// Show a single user
    Show {
        /// User ID
        id: u64,
    },
    /// Create a user (prompts for missing fields)
    Create {
        #[command(flatten)]
        fields: UserFields,
    },
    /// Update a user (prompts when no field is given)
    Update {
        /// User ID
        id: u64,

        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: u64,

        /// Page the user is listed on
        #[arg(long, short = 'p')]
        page: Option<u32>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Interactive session: log in, browse and edit users
    Console,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
