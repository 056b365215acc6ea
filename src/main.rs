//! Fleetboard CLI
//!
//! Fetches fleet records, filters them, and produces table pages,
//! chart data and CSV exports.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use fleetboard::aggregator::ColorScheme;
use fleetboard::commands::{
    clear_cache, display_options, display_version, execute_charts, execute_table, fetch_records,
    ChartsArgs, FilterArgs, LoadArgs, TableArgs,
};
use fleetboard::utils::config::resolve_config;
use std::path::PathBuf;

/// Fleetboard - fleet record dashboard in the terminal
#[derive(Parser, Debug)]
#[command(name = "fleetboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (defaults to ./fleetboard.toml when present)
    #[arg(short, long, global = true, env = "FLEETBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where records come from
#[derive(Args, Debug)]
struct SourceOpts {
    /// Record source URL or JSON file (overrides config)
    #[arg(short, long)]
    source: Option<String>,

    /// Ignore cached records and fetch again
    #[arg(long)]
    refresh: bool,

    /// Do not read or write the cache
    #[arg(long)]
    no_cache: bool,

    /// Treat integer strings such as "30" as numbers
    #[arg(long)]
    normalize_numbers: bool,
}

impl From<SourceOpts> for LoadArgs {
    fn from(opts: SourceOpts) -> Self {
        Self {
            source: opts.source,
            refresh: opts.refresh,
            no_cache: opts.no_cache,
            normalize_numbers: opts.normalize_numbers,
        }
    }
}

/// Search and field filters
#[derive(Args, Debug)]
struct FilterOpts {
    /// Case-insensitive search on the user name
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    zone: Option<String>,

    #[arg(long)]
    device_brand: Option<String>,

    #[arg(long)]
    vehicle_brand: Option<String>,

    #[arg(long)]
    vehicle_cc: Option<String>,

    /// SDK version
    #[arg(long)]
    sdk_int: Option<String>,
}

impl From<FilterOpts> for FilterArgs {
    fn from(opts: FilterOpts) -> Self {
        Self {
            search: opts.search,
            zone: opts.zone,
            device_brand: opts.device_brand,
            vehicle_brand: opts.vehicle_brand,
            vehicle_cc: opts.vehicle_cc,
            sdk_int: opts.sdk_int,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load records (from cache or source) and report the count
    Fetch {
        #[command(flatten)]
        source: SourceOpts,
    },

    /// Show a page of the filtered record table
    Table {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filters: FilterOpts,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Export all filtered rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Aggregate filtered records into chart data
    Charts {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filters: FilterOpts,

        /// Output path for JSON chart report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print charts to stdout
        #[arg(long)]
        summary: bool,

        /// Color generation for chart segments
        #[arg(long, value_enum)]
        colors: Option<ColorScheme>,
    },

    /// List the available values for each filter
    Options {
        #[command(flatten)]
        source: SourceOpts,
    },

    /// Remove the cached record list
    CacheClear,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = resolve_config(cli.config.as_deref()).context("Failed to load config")?;

    // Execute command
    match cli.command {
        Commands::Fetch { source } => {
            fetch_records(&config, &source.into())?;
        }

        Commands::Table {
            source,
            filters,
            page,
            page_size,
            csv,
        } => {
            let args = TableArgs {
                load: source.into(),
                filters: filters.into(),
                page,
                page_size,
                csv,
            };
            execute_table(&config, args)?;
        }

        Commands::Charts {
            source,
            filters,
            output,
            summary,
            colors,
        } => {
            let args = ChartsArgs {
                load: source.into(),
                filters: filters.into(),
                output,
                print_summary: summary,
                color_scheme: colors,
            };
            execute_charts(&config, args)?;
        }

        Commands::Options { source } => {
            display_options(&config, &source.into())?;
        }

        Commands::CacheClear => {
            clear_cache(&config)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
