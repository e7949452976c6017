use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "txdash-tui")]
#[command(about = "Terminal dashboard for the transactions workshop API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured transactions API
    Run,
    /// Run against an in-memory backend that streams synthetic transactions
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
