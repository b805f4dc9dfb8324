use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stockpile",
    about = "Stockpile: inventory items behind reversible identifiers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP item service on an in-memory store
    Serve(ServeArgs),
    /// Encode or decode item identifiers
    Id(IdArgs),
    /// Validate a JSON batch of items and show their identifiers
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind, overriding the config file
    #[arg(long)]
    pub bind: Option<String>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct IdArgs {
    #[command(subcommand)]
    pub action: IdAction,
}

#[derive(Subcommand)]
pub enum IdAction {
    /// Derive the identifier of a name
    Encode { name: String },
    /// Recover the name behind an identifier
    Decode { id: String },
}

#[derive(Args)]
pub struct CheckArgs {
    /// JSON file holding an array of items
    pub file: PathBuf,
}
