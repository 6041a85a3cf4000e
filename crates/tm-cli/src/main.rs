//! tm - Task Manager CLI
//!
//! A command-line client for the tm-server REST API.
//!
//! # Examples
//!
//! ```bash
//! # Create an account and log in
//! tm register --user-name alice --email a@x.com --password Secret123
//! tm login --email a@x.com --password Secret123
//!
//! # Work with tasks
//! tm task add "Write report" --due 2026-09-01 --description "Quarterly summary"
//! tm task list --status pending --pretty
//! tm task done 3
//! ```

mod cli;
mod commands;
mod task_commands;

use crate::{cli::Cli, commands::Commands, task_commands::TaskCommands};

use tm_cli::{Client, CredentialsStore};

use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let credentials = match CredentialsStore::from_config_dir() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let client = Client::new(&cli.server, credentials);

    let result = match cli.command {
        Commands::Register {
            user_name,
            email,
            password,
        } => client.register(&user_name, &email, &password).await,

        Commands::Login { email, password } => client.login(&email, &password).await,

        Commands::Logout => client.logout().await,

        Commands::Task { action } => match action {
            TaskCommands::Add {
                title,
                description,
                due,
            } => match parse_due_date(&due) {
                Ok(due_date) => {
                    client
                        .create_task(&title, description.as_deref(), &due_date)
                        .await
                }
                Err(message) => {
                    eprintln!("Error: {}", message);
                    return ExitCode::FAILURE;
                }
            },
            TaskCommands::List { status } => client.list_tasks(status.as_deref()).await,
            TaskCommands::Get { id } => client.get_task(id).await,
            TaskCommands::Update {
                id,
                title,
                description,
                due,
            } => match parse_due_date(&due) {
                Ok(due_date) => {
                    client
                        .update_task(id, &title, description.as_deref(), &due_date)
                        .await
                }
                Err(message) => {
                    eprintln!("Error: {}", message);
                    return ExitCode::FAILURE;
                }
            },
            TaskCommands::Done { id } => client.complete_task(id).await,
            TaskCommands::Reopen { id } => client.reopen_task(id).await,
            TaskCommands::Delete { id } => client.delete_task(id).await,
        },
    };

    // Handle result
    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Accept either a full RFC3339 timestamp or a plain YYYY-MM-DD date
/// (interpreted as end of that day, UTC).
fn parse_due_date(input: &str) -> Result<String, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc).to_rfc3339());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(23, 59, 59) {
            return Ok(dt.and_utc().to_rfc3339());
        }
    }

    Err(format!(
        "Invalid due date '{}': expected RFC3339 or YYYY-MM-DD",
        input
    ))
}
