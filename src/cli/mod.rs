//! Command-line interface for Cinematika.

mod commands;

use clap::{Parser, Subcommand};

/// Cinematika - film catalog REST backend
#[derive(Parser)]
#[command(name = "cinematika")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default when no command is given)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Allow a registered user to log in
    Activate {
        /// Username given at registration
        username: String,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["cinematika"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_user_activate_parses() {
        let cli = Cli::try_parse_from(["cinematika", "user", "activate", "alice"]).unwrap();
        match cli.command {
            Some(Commands::User {
                command: UserCommands::Activate { username },
            }) => assert_eq!(username, "alice"),
            _ => panic!("expected user activate"),
        }
    }
}
