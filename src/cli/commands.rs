use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    /// Path of the identity database (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Add a new group
    Add {
        /// Name of the new group
        name: String,
    },

    /// Delete a group; its members fall back to the invalid group
    Del {
        /// Name of the group to delete
        name: String,
    },

    /// Show a single group
    Show {
        /// Group name, or gid with --id
        #[arg(allow_negative_numbers = true)]
        group: String,

        /// Treat the argument as a numeric gid
        #[arg(long)]
        id: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all groups
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a new user to an existing group
    Add {
        /// Name of the new user
        name: String,

        /// Primary group of the new user
        #[arg(long, short)]
        group: String,
    },

    /// Delete a user
    Del {
        /// Name of the user to delete
        name: String,
    },

    /// Show a single user
    Show {
        /// User name, or uid with --id
        #[arg(allow_negative_numbers = true)]
        user: String,

        /// Treat the argument as a numeric uid
        #[arg(long)]
        id: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
