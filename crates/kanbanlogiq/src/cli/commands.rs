//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::role::{Role, ADMINISTRATOR_SLUG, CUSTOMER_SLUG};

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Home command arguments.
#[derive(Debug, Args)]
pub struct HomeCommand {
    /// Role display name, e.g. "Amministratore" or "Cliente"
    #[arg(short, long)]
    pub role: String,
}

/// Orders command arguments.
#[derive(Debug, Args)]
pub struct OrdersCommand {
    /// Only show orders of this customer
    #[arg(long, value_name = "ID")]
    pub customer: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Trays command arguments.
#[derive(Debug, Args)]
pub struct TraysCommand {
    /// Order whose trays to show
    pub order_id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// User management commands.
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Create a user
    Add {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Access level
        #[arg(short, long, value_enum, default_value = "customer")]
        role: RoleArg,
    },
}

/// Database commands.
#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Drop every table, recreate the schema, and load demo data
    Rebuild {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show row counts and schema version
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Role argument for user creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Back-office administrator
    Admin,
    /// Customer
    Customer,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::from_slug(ADMINISTRATOR_SLUG),
            RoleArg::Customer => Role::from_slug(CUSTOMER_SLUG),
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// HTML fragments
    Html,
    /// JSON output
    Json,
}
