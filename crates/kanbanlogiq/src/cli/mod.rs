//! Command-line interface for kanbanlogiq.
//!
//! This module provides the CLI structure for the `kanbanlogiq` binary.
//! The handlers live in the binary itself.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DbCommand, HomeCommand, LoginCommand, OrdersCommand, OutputFormat, RoleArg,
    TraysCommand, UsersCommand,
};

/// kanbanlogiq - Order and installation tray tracking
///
/// Log in as an administrator or a customer, follow order fulfilment, and
/// inspect the fill level of installation trays.
#[derive(Debug, Parser)]
#[command(name = "kanbanlogiq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and print where the user lands
    Login(LoginCommand),

    /// Print the landing page for a role
    Home(HomeCommand),

    /// Show order fulfilment progress
    Orders(OrdersCommand),

    /// Show the installation trays of an order
    Trays(TraysCommand),

    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage the database
    #[command(subcommand)]
    Db(DbCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}
