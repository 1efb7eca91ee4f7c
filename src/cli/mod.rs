//! CLI module - Command-line interface for Watchlist
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a single-user movie watchlist web app
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default when no command is given)
    Serve,

    /// Create the database schema
    InitDb {
        /// Drop existing tables and recreate them
        #[arg(long)]
        drop: bool,
    },

    /// Seed the database with the fixture movie list
    Forge,

    /// Create the admin user, or reset its password
    Admin {
        /// Login name of the admin user
        #[arg(long)]
        username: String,

        /// Password; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
