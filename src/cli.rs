// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "Startup-time deployment orchestrator for ordered unit deployment")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the stagehand.yml configuration file
    Check,

    /// Print the merged deployment order without deploying
    Plan {
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Execute the deployment run
    Run,
}
