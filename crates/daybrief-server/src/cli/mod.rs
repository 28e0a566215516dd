pub mod generate;

use crate::config::ServeConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daybrief")]
#[command(version, about = "Daily reading briefings and insights backed by the Gemini API")]
pub struct Cli {
    /// daybrief server base URL for client commands
    #[arg(
        long,
        global = true,
        env = "DAYBRIEF_ADDR",
        default_value = "http://localhost:8787"
    )]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP proxy server
    Serve(ServeConfig),
    /// Request a structured briefing for an entry
    Briefing(BriefingArgs),
    /// Ask a free-text question about an entry
    Insight(InsightArgs),
}

#[derive(Args, Debug)]
pub struct BriefingArgs {
    /// Path to a JSON file holding one content entry
    #[arg(long)]
    pub entry: PathBuf,
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct InsightArgs {
    /// Path to a JSON file holding one content entry
    #[arg(long)]
    pub entry: PathBuf,
    /// The question to ask about the entry
    #[arg(long)]
    pub query: String,
    #[arg(long, default_value = "text")]
    pub format: String,
}
