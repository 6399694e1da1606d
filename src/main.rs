// ABOUTME: Entry point for the stagehand CLI application.
// ABOUTME: Parses arguments and dispatches to check, plan, or run.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use stagehand::config::Config;
use stagehand::error::Result;
use stagehand::host::{ExecFactory, TokioHost};
use stagehand::orchestrate::{Orchestrator, merge_units};
use stagehand::registry::StaticRegistry;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().expect("Failed to get current directory");
    let config = Config::discover(&cwd)?;

    match cli.command {
        Commands::Check => {
            println!(
                "Configuration OK: {} unit(s), deadline: {}",
                config.units.len(),
                match config.deadline() {
                    Some(limit) => format!("{limit:?}"),
                    None => "none".to_string(),
                }
            );
            Ok(())
        }
        Commands::Plan { json } => {
            let plan = merge_units(vec![], config.units.clone());
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for unit in &plan {
                    println!("{:>6}  {}", unit.options.order, unit.descriptor);
                }
            }
            Ok(())
        }
        Commands::Run => {
            let mut host = TokioHost::new();
            host.register_factory("exec", Arc::new(ExecFactory));

            let registry = Arc::new(StaticRegistry::new());
            let orchestrator = Orchestrator::new(config, registry, Arc::new(host));

            let summary = orchestrator.run().await?;
            println!("Deployed {} unit(s)", summary.count());
            for (descriptor, id) in &summary.deployed {
                println!("  {descriptor} -> {id}");
            }
            Ok(())
        }
    }
}
