use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "opswatch")]
#[command(author, version, about = "Supervisor-agent demo for IT operations observability", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the agent hierarchy and sample tool output (no model calls)
    Demo {
        /// Server identifier to pull logs for
        #[arg(long)]
        server_id: Option<String>,

        /// Lookback window (hours) for the utilization summary
        #[arg(long)]
        hours: Option<i64>,
    },

    /// Route prompts through the supervisor against the hosted model
    Run {
        /// One or more user prompts (defaults to an ops briefing request)
        prompts: Vec<String>,

        /// Print delegation steps and intermediate thoughts
        #[arg(short, long)]
        verbose: bool,

        /// Suppress console transcripts and only report event counts
        #[arg(short, long)]
        quiet: bool,
    },
}
