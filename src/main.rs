use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use waam_extractor::{authors, charts, constants, logging, pipeline};

#[derive(Parser)]
#[command(name = "waam_extractor")]
#[command(about = "WAAM alloy experiment data extraction and plotting")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten the raw corpus into the per-alloy derived store
    Extract {
        /// Raw corpus location
        #[arg(long, default_value = constants::RAW_STORE)]
        input: PathBuf,
        /// Derived store location
        #[arg(long, default_value = constants::DERIVED_STORE)]
        output: PathBuf,
    },
    /// Extract authors' institutes from the raw corpus
    Authors {
        /// Raw corpus location
        #[arg(long, default_value = constants::RAW_STORE)]
        input: PathBuf,
        /// Artifact location
        #[arg(long, default_value = constants::AUTHORS_OUTPUT)]
        output: PathBuf,
    },
    /// Render one chart from the derived store, or all of them
    Plot {
        /// Chart name (see --chart list), or "all"
        #[arg(long)]
        chart: String,
        /// Derived store location
        #[arg(long, default_value = constants::DERIVED_STORE)]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { input, output } => {
            println!("🔄 Running extraction...");
            let outcome = pipeline::run_extraction(&input, &output)?;
            println!(
                "\n📊 Extraction results: {} entries -> {} records in {} categories",
                outcome.raw_entries, outcome.total_records, outcome.categories
            );
        }
        Commands::Authors { input, output } => {
            println!("🔄 Extracting authors' institutes...");
            authors::run_authors(&input, &output)?;
        }
        Commands::Plot { chart, store } => {
            let output_dir = PathBuf::from(".");
            if chart == "list" {
                for spec in charts::CHARTS {
                    println!("{}", spec.name);
                }
                return Ok(());
            }
            if chart == "all" {
                for spec in charts::CHARTS {
                    println!("\n🔄 Running chart {}...", spec.name);
                    pipeline::run_chart(spec, &store, &output_dir)?;
                }
                info!("all charts finished");
                return Ok(());
            }
            match charts::chart_by_name(&chart) {
                Some(spec) => pipeline::run_chart(spec, &store, &output_dir)?,
                None => {
                    let known: Vec<&str> = charts::CHARTS.iter().map(|s| s.name).collect();
                    bail!("unknown chart '{}'; available: {}", chart, known.join(", "));
                }
            }
        }
    }

    Ok(())
}
