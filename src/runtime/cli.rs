use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// audioshelf - index, browse and search your audio folders
#[derive(Parser, Debug)]
#[command(name = "audioshelf", version, about)]
pub struct Args {
    /// State file to use instead of the configured one
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Walk a directory and add it to the library
    Add { dir: PathBuf },
    /// Remove a directory and everything below it from the library
    Remove { dir: PathBuf },
    /// Print the indexed directories as a tree
    Tree,
    /// List the audio files directly inside an indexed directory
    Show {
        dir: PathBuf,
        /// How long to wait for durations before printing
        #[arg(long, default_value_t = 2000)]
        wait_ms: u64,
    },
    /// Find audio files whose name contains a term
    Search {
        term: String,
        #[arg(long, default_value_t = 2000)]
        wait_ms: u64,
    },
    /// Forget every indexed directory
    Clear,
}
