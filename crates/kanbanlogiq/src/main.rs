//! `kanbanlogiq` - CLI for order and tray tracking
//!
//! This binary provides the command-line interface for logging in, following
//! order progress, inspecting installation trays, and managing the database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;

use kanbanlogiq::auth::{login_error_message, Authenticator, Blake3Cipher, LoginRequest};
use kanbanlogiq::cli::{
    Cli, Command, ConfigCommand, DbCommand, HomeCommand, LoginCommand, OrdersCommand,
    OutputFormat, TraysCommand, UsersCommand,
};
use kanbanlogiq::locale::{Catalog, Messages};
use kanbanlogiq::render::{ProgressBar, TrayView};
use kanbanlogiq::routing::{resolve_home_route, RouteTable};
use kanbanlogiq::storage::{
    seed_demo_data, NewUser, Storage, DEMO_ADMIN_EMAIL, DEMO_CUSTOMER_EMAIL, DEMO_PASSWORD,
};
use kanbanlogiq::logging::Verbosity;
use kanbanlogiq::{init_logging, Config, Error};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(Verbosity::from(&cli));

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let messages = config.locale.language.messages();

    // Execute the command
    match cli.command {
        Command::Login(cmd) => handle_login(&config, messages, &cmd),
        Command::Home(cmd) => {
            handle_home(&config, &cmd);
            Ok(())
        }
        Command::Orders(cmd) => handle_orders(&config, messages, &cmd),
        Command::Trays(cmd) => handle_trays(&config, messages, &cmd),
        Command::Users(cmd) => handle_users(&config, cmd),
        Command::Db(cmd) => handle_db(&config, cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("failed to open {}", path.display()))
}

fn handle_login(config: &Config, messages: &Messages, cmd: &LoginCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let cipher = Blake3Cipher::from_config(config)?;
    let routes = RouteTable::new(config.routes.clone());
    let auth = Authenticator::new(&cipher, &storage, &routes);

    match auth.login(&LoginRequest::new(cmd.email.as_str(), cmd.password.as_str())) {
        Ok(outcome) => {
            println!("{}", outcome.redirect);
            Ok(())
        }
        Err(err) => {
            let Some(message) = login_error_message(&err, messages) else {
                return Err(err.into());
            };
            // A blank field is a usage mistake: exit 2 with clap's usage line
            if err.is_validation_error() {
                Cli::command().error(ErrorKind::ValueValidation, message).exit();
            }
            bail!(message)
        }
    }
}

fn handle_home(config: &Config, cmd: &HomeCommand) {
    let routes = RouteTable::new(config.routes.clone());
    let route = resolve_home_route(&cmd.role);
    debug!(role = %cmd.role, %route, "resolved home route");
    println!("{}", routes.url_for(route));
}

fn handle_orders(config: &Config, messages: &Messages, cmd: &OrdersCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let orders = storage.list_orders(cmd.customer)?;

    match cmd.format {
        OutputFormat::Plain => {
            if orders.is_empty() {
                println!("No orders.");
            }
            for order in &orders {
                let bar = ProgressBar::for_order(order);
                println!(
                    "{:<12} {:>4}%  {}",
                    order.code,
                    bar.rounded_percent(),
                    bar.level()
                );
            }
        }
        OutputFormat::Html => {
            for order in &orders {
                println!("{}", ProgressBar::for_order(order).render(messages)?);
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = orders
                .iter()
                .map(|order| {
                    let bar = ProgressBar::for_order(order);
                    serde_json::json!({
                        "id": order.id,
                        "code": order.code,
                        "customer_id": order.customer_id,
                        "percent": bar.percent(),
                        "level": bar.level(),
                        "width": bar.display_percent(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

fn handle_trays(config: &Config, messages: &Messages, cmd: &TraysCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let order = storage
        .get_order(cmd.order_id)?
        .ok_or_else(|| Error::not_found("order", cmd.order_id))?;
    let trays: Vec<TrayView> = storage
        .trays_for_order(cmd.order_id)?
        .iter()
        .map(TrayView::from_item)
        .collect();

    match cmd.format {
        OutputFormat::Plain => {
            println!("Order {}", order.code);
            if trays.is_empty() {
                println!("No trays.");
            }
            for tray in &trays {
                println!("  {:<16} {}", tray.barcode(), tray.popover(messages));
            }
        }
        OutputFormat::Html => {
            for tray in &trays {
                println!("{}", tray.render(messages)?);
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = trays
                .iter()
                .map(|tray| {
                    serde_json::json!({
                        "barcode": tray.barcode(),
                        "class": format!("vaschetta_{}", tray.class_key()),
                        "label": tray.label(messages),
                        "color": tray.color(),
                        "width": tray.percent(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

fn handle_users(config: &Config, cmd: UsersCommand) -> anyhow::Result<()> {
    match cmd {
        UsersCommand::Add {
            email,
            password,
            name,
            role,
        } => {
            let storage = open_storage(config)?;
            let cipher = Blake3Cipher::from_config(config)?;
            let user = NewUser::new(name, email, password, role.into());
            let id = storage
                .insert_user(&user, &cipher)
                .with_context(|| format!("failed to create user {}", user.email))?;
            println!("Created user {id} ({})", user.role.display_name());
        }
    }
    Ok(())
}

fn handle_db(config: &Config, cmd: DbCommand) -> anyhow::Result<()> {
    match cmd {
        DbCommand::Rebuild { yes } => {
            if !yes {
                println!("This will delete all data in {}.", config.database_path().display());
                println!("Use --yes to confirm.");
                return Ok(());
            }
            let cipher = Blake3Cipher::from_config(config)?;
            let storage = open_storage(config)?;
            storage.rebuild()?;
            let summary = seed_demo_data(&storage, &cipher)?;
            println!(
                "Database rebuilt: {} users, {} orders, {} trays.",
                summary.users, summary.orders, summary.trays
            );
            println!("Demo accounts: {DEMO_ADMIN_EMAIL}, {DEMO_CUSTOMER_EMAIL} (password: {DEMO_PASSWORD})");
        }
        DbCommand::Status { json } => {
            let storage = open_storage(config)?;
            let stats = storage.stats()?;
            if json {
                let status = serde_json::json!({
                    "database_path": storage.path(),
                    "stats": stats,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("kanbanlogiq database");
                println!("--------------------");
                println!("Path:           {}", storage.path().display());
                println!("Schema version: {}", stats.schema_version);
                println!("Users:          {}", stats.users);
                println!("Orders:         {}", stats.orders);
                println!("Order items:    {}", stats.order_items);
                println!("Trays:          {}", stats.trays);
                println!("Size:           {} bytes", stats.db_size_bytes);
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut shown = config.clone();
                if shown.auth.credential_key.is_some() {
                    shown.auth.credential_key = Some("<redacted>".to_string());
                }
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                let catalog =
                    Catalog::with_overrides(config.locale.language, &config.locale.translations);

                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Auth]");
                println!(
                    "  Credential key:     {}",
                    if config.auth.credential_key.is_some() { "set" } else { "not set" }
                );
                println!();
                println!("[Routes]");
                println!("  Admin home:         {}", config.routes.admin_home);
                println!("  Customer home:      {}", config.routes.customer_home);
                println!("  Home:               {}", config.routes.home);
                println!("  Login:              {}", config.routes.login);
                println!();
                println!("[Locale]");
                println!("  Language:           {:?}", config.locale.language);
                println!("  Translations:       {}", catalog.len());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
