use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve a table of Instagram post links into gallery media
#[derive(Parser)]
#[command(name = "reelgrid")]
#[command(about = "Turn a TSV/CSV of post links into playable gallery media", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user config dir if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a table and print its rows as JSON
    Parse {
        /// Table file, or `-` for stdin (default: built-in demo table)
        input: Option<String>,
    },
    /// Parse and resolve a table, printing media items as JSON
    Resolve {
        /// Table file, or `-` for stdin (default: built-in demo table)
        input: Option<String>,
        /// Use fixed sample media instead of the Graph API
        #[arg(long)]
        sample: bool,
        /// Resolve every row and report failures per row instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
    /// Resolve a table and print it as text cards
    Gallery {
        /// Table file, or `-` for stdin (default: built-in demo table)
        input: Option<String>,
        /// Use fixed sample media instead of the Graph API
        #[arg(long)]
        sample: bool,
    },
    /// Run one request through the resolve service and print the response
    Request {
        /// JSON body file, or `-` for stdin (default: demo table as `{rows}`)
        body: Option<String>,
        /// Request method
        #[arg(short = 'X', long, default_value = "POST")]
        method: String,
        /// Use fixed sample media instead of the Graph API
        #[arg(long)]
        sample: bool,
    },
}
