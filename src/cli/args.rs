// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all notes
    List {
        /// Output notes as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        /// Note name
        #[arg(short, long)]
        name: String,

        /// Note description
        #[arg(short, long)]
        description: String,

        /// Image file to attach
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Edit a note; fields not given keep their current value
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// Replacement image file
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Delete a note and its image
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Open the notes page in the browser
    Render,

    /// End the configured session
    SignOut,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
