// Desktop tooling binary; unwrap/expect acceptable outside library code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod config;
mod report;
mod suite;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gfx_testing::{DirAssets, ResourceMap, Runner};
use tracing_subscriber::EnvFilter;

use config::{Overrides, RunnerConfig};

#[derive(Parser)]
#[command(name = "gfx-runner")]
#[command(about = "Pixel regression suite for the watch graphics stack", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bundled suite and report each test
    Run {
        /// Display to emulate (aplite, basalt, chalk, diorite, emery)
        #[arg(short, long)]
        display: Option<String>,
        /// Directory with reference images
        #[arg(long)]
        resources: Option<PathBuf>,
        /// Save a PNG of the framebuffer of every failed test here
        #[arg(long)]
        artifacts: Option<PathBuf>,
        /// Only run tests whose `module::name` contains this
        filter: Option<String>,
    },
    /// List registered tests
    List {
        /// Only list tests whose `module::name` contains this
        filter: Option<String>,
    },
    /// Print the display catalogue
    Displays {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            display,
            resources,
            artifacts,
            filter,
        } => {
            let overrides = Overrides {
                display,
                resources,
                artifacts,
                filter,
            };
            run(&RunnerConfig::resolve(cli.config.as_deref(), overrides)?)
        }
        Commands::List { filter } => {
            let overrides = Overrides {
                filter,
                ..Overrides::default()
            };
            list(&RunnerConfig::resolve(cli.config.as_deref(), overrides)?);
            Ok(())
        }
        Commands::Displays { json } => displays(json),
    }
}

fn run(config: &RunnerConfig) -> Result<()> {
    let spec = config.screen()?;
    let mut registry = suite::registry();
    if let Some(filter) = &config.filter {
        registry.retain_matching(filter);
    }

    let mut resources = ResourceMap::new(DirAssets::new(&config.resources));
    for (name, id) in &config.mappings {
        if !resources.map_resource(name, *id) {
            anyhow::bail!(
                "Config maps '{name}' to {id}, but it is not in {}",
                config.resources.display()
            );
        }
    }

    let mut runner = Runner::new(spec, resources);
    if let Some(dir) = &config.artifacts {
        runner = runner.with_artifacts(dir);
    }

    println!();
    println!(
        "{}",
        format!(
            "Running {} test(s) on {} ({}x{})",
            registry.len(),
            spec.name,
            spec.width,
            spec.height
        )
        .cyan()
        .bold()
    );
    println!();

    let mut summary = report::Summary::default();
    for outcome in runner.run_all(&registry) {
        report::print_outcome(&outcome);
        summary.record(&outcome);
    }
    report::print_summary(&summary);

    if summary.failed > 0 {
        anyhow::bail!("{} of {} tests failed", summary.failed, summary.total());
    }
    Ok(())
}

fn list(config: &RunnerConfig) {
    let mut registry = suite::registry();
    if let Some(filter) = &config.filter {
        registry.retain_matching(filter);
    }
    for record in registry.records() {
        println!("{record}");
    }
    println!("{}", format!("{} test(s)", registry.len()).dimmed());
}

fn displays(json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(gfx_types::displays::ALL)
            .context("Failed to serialize display catalogue")?;
        println!("{text}");
        return Ok(());
    }
    for spec in gfx_types::displays::ALL {
        println!(
            "{:<8} {:>3}x{:<3} {}, {}",
            spec.name.bold(),
            spec.width,
            spec.height,
            spec.shape,
            spec.depth
        );
    }
    Ok(())
}
