use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docstore",
    about = "Documents store: named documents on disk, with optional archiving",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the store directories
    #[arg(long, global = true)]
    pub location: Option<PathBuf>,

    /// Name of the main store
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Archive deleted documents into this store
    #[arg(long, global = true)]
    pub archive: Option<String>,

    /// Use a throwaway in-memory store
    #[arg(long, global = true)]
    pub memory: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List documents
    List,
    /// Show the number of documents
    Count,
    /// Print a document or write it to a file
    Get(GetArgs),
    /// Save a document from a file or from text
    Put(PutArgs),
    /// Rename a document
    Rename(RenameArgs),
    /// Delete (or archive) a document
    Delete(DeleteArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct GetArgs {
    pub name: String,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "text"])))]
pub struct PutArgs {
    pub name: String,
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct RenameArgs {
    pub from: String,
    pub to: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub name: String,
}
