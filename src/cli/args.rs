// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (init, serve, list, or add)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a default config file to `--config` or the default location
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run the web front end
    Serve {
        /// Address to listen on, overrides `server.bind`
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// List saved comments and bugs
    List {
        /// Include notes missing a title or comment
        #[arg(long)]
        all: bool,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a new comment or bug
    Add {
        /// Title of the entry
        #[arg(short, long, value_name = "TITLE", default_value = "")]
        title: String,

        /// Comment body
        #[arg(long, value_name = "COMMENT", default_value = "")]
        comment: String,
    },
}
