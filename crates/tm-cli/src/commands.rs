use crate::task_commands::TaskCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a new account
    Register {
        /// Display name
        #[arg(long)]
        user_name: String,
        /// Login email
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Log in and store the token pair locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the server session and forget the stored tokens
    Logout,

    /// Task operations
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
}
