//! CLI definitions for the `mimic` binary.

pub mod history;

use clap::{Parser, Subcommand};

/// A chat bot that answers allow-listed contacts in a persona's voice.
#[derive(Parser)]
#[command(name = "mimic", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,mimic_core=debug,mimic_infra=debug,mimic_api=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook server and answer incoming messages.
    Serve {
        /// Port to listen on (falls back to $PORT, then 3000).
        #[arg(long)]
        port: Option<u16>,

        /// Host address to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Print the history window the next reply to IDENTITY would see.
    History {
        /// Sender identity, e.g. 919999999999@c.us.
        identity: String,
    },

    /// Print the effective configuration (tokens omitted).
    Config,
}
