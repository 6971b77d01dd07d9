// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to SQLite database, overrides the config file
    #[arg(short, long, value_name = "DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8787
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,

        /// Keep everything in memory; nothing survives a restart
        #[arg(long)]
        memory: bool,
    },

    /// Print the stored content of a pad
    Show {
        /// Pad ID (the URL path)
        #[arg(value_name = "PAD_ID")]
        pad_id: String,

        /// Output pad as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a pad from the store
    Delete {
        /// Pad ID (the URL path)
        #[arg(value_name = "PAD_ID")]
        pad_id: String,
    },

    /// List notes of the multi-note app with ID and first line
    List {
        /// Optional search term to filter notes by title or content
        #[arg(value_name = "SEARCH")]
        search: Option<String>,
    },
}
