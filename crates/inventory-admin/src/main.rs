//! # inventory-admin
//!
//! Command-line host for the inventory back office.
//!
//! ```bash
//! inventory-admin resources
//! inventory-admin list productos --page 2 --page-size 25
//! inventory-admin show almacenes 3
//! INVENTORY_LOG=info inventory-admin delete categorias 7
//! ```

use clap::{Parser, Subcommand};
use inventory_admin::commands;
use inventory_admin::model::ResourceKind;
use inventory_admin::{with_resource, AdminConfig, AdminError, AdminSystem};
use slice_framework::tracing::setup_tracing_with_default;
use slice_framework::Level;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "inventory-admin", version, about = "Inventory back-office client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of a resource table
    List {
        /// Resource endpoint, e.g. `productos`
        resource: ResourceKind,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page: 10, 25 or 50
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Print a single record
    Show { resource: ResourceKind, id: String },
    /// Delete a record (requires a session token)
    Delete { resource: ResourceKind, id: String },
    /// List the known resources
    Resources,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    setup_tracing_with_default(&config.log_filter);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &AdminConfig) -> Result<(), AdminError> {
    if let Command::Resources = command {
        print!("{}", commands::resource_listing());
        return Ok(());
    }

    let system = AdminSystem::new(config)?;
    let mut notifications = system.notifications();
    info!(api_url = %config.api_url, "Starting");

    let outcome = match command {
        Command::List {
            resource,
            page,
            page_size,
        } => with_resource!(resource, T => commands::list::<T>(&system, page, page_size).await)
            .map(|table| print!("{table}")),
        Command::Show { resource, id } => {
            with_resource!(resource, T => commands::show::<T>(&system, &id).await)
                .map(|record| print!("{record}"))
        }
        Command::Delete { resource, id } => {
            with_resource!(resource, T => commands::delete::<T>(&system, &id).await)
        }
        Command::Resources => Ok(()),
    };

    // Notifications are emitted before the triggering call returns
    while let Ok(note) = notifications.try_recv() {
        match note.level {
            Level::Success => println!("{}", note.message),
            Level::Error => eprintln!("{}", note.message),
        }
    }

    system.shutdown().await?;
    outcome
}
