mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dqe")]
#[command(version, about = "E-commerce Data Quality Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one table against its entity schema
    Validate {
        /// Path to a JSON file containing an array of records
        data: String,

        /// Entity type: users, sellers, products, sales, payments
        #[arg(short, long)]
        entity: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the full JSON report to this path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate every table in a directory and check cross references
    CheckAll {
        /// Directory containing <entity>.json files
        dir: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the full JSON report to this path
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            data,
            entity,
            format,
            output,
        } => commands::validate::execute(&data, &entity, &format, output.as_deref()),

        Commands::CheckAll {
            dir,
            format,
            output,
        } => commands::check_all::execute(&dir, &format, output.as_deref()),
    }
}
