use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tm")]
#[command(about = "Task Manager CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Server URL
    #[arg(long, global = true, env = "TM_SERVER", default_value = "http://127.0.0.1:8000")]
    pub(crate) server: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
