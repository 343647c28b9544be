//! CLI module for the user account service

pub mod serve;

use clap::{Parser, Subcommand};

/// User account service - registration, login and password management
#[derive(Parser)]
#[command(name = "user-account-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
