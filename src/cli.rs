use clap::{Parser, Subcommand};

/// Read-aloud practice session service
#[derive(Debug, Parser)]
#[command(name = "pte-practice", version, about)]
pub struct Cli {
    /// Config file (extension optional)
    #[arg(long, short, global = true, default_value = "config/pte-practice")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the practice session HTTP API
    Serve {
        /// Override `service.http.bind`
        #[arg(long)]
        bind: Option<String>,

        /// Override `service.http.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Score a transcript against a passage and print the result as JSON
    Score {
        #[arg(long)]
        reference: String,

        #[arg(long)]
        transcript: String,

        /// Score only this line of the passage
        #[arg(long)]
        highlight: Option<String>,
    },
}
