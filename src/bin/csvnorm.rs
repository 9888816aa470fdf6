//! csvnorm: Load a CSV file into a SQL table
//!
//! Usage:
//!   # Load into a throwaway in-memory database
//!   csvnorm people.csv
//!
//!   # Keep the result on disk under a chosen table name
//!   csvnorm people.csv --database people.db --table people
//!
//!   # Print a JSON summary of the load
//!   csvnorm people.csv --report

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csvnorm::{load_csv, logging, AdvisorRegistry, LoadConfig, RaggedRowPolicy};
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(name = "csvnorm")]
#[command(about = "Load a CSV file into a SQL table", long_about = None)]
struct Args {
    /// CSV file to load
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Destination table name (default: csvimport)
    #[arg(long)]
    table: Option<String>,

    /// SQLite database path (default: :memory:)
    #[arg(long)]
    database: Option<String>,

    /// Maximum bound parameters per INSERT statement (default: 900)
    #[arg(long)]
    max_params: Option<usize>,

    /// What to do with rows whose field count differs from the header
    #[arg(long, value_enum, default_value_t = RaggedRows::Reject)]
    ragged_rows: RaggedRows,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value_t = Level::DEBUG)]
    log_level: Level,

    /// Print the load summary and any recommendations as JSON on stdout
    #[arg(long)]
    report: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RaggedRows {
    Reject,
    Conform,
}

impl From<RaggedRows> for RaggedRowPolicy {
    fn from(value: RaggedRows) -> Self {
        match value {
            RaggedRows::Reject => RaggedRowPolicy::Reject,
            RaggedRows::Conform => RaggedRowPolicy::Conform,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Build config
    let mut config = LoadConfig::default();
    if let Some(table) = args.table {
        config.table_name = table;
    }
    if let Some(database) = args.database {
        config.database = database;
    }
    if let Some(max_params) = args.max_params {
        config.max_params_per_statement = max_params;
    }
    config.ragged_rows = args.ragged_rows.into();

    let dispatch = logging::build_dispatch(args.log_level);

    let mut conn = tracing::dispatcher::with_default(&dispatch, || {
        Connection::open(&config.database)
            .inspect_err(|e| error!("Could not open sqlite {}: {}", config.database, e))
    })
    .with_context(|| format!("Could not open sqlite {}", config.database))?;

    let report = load_csv(&args.input, &mut conn, &config, dispatch.clone())
        .with_context(|| format!("Could not load {} into sqlite", args.input.display()))?;

    let table = report.table_definition();
    let registry = AdvisorRegistry::new();
    let recommendations = tracing::dispatcher::with_default(&dispatch, || {
        info!("Loaded {} rows into {}", report.rows_inserted, report.table);
        registry
            .run(&table, &conn)
            .inspect_err(|e| error!("Normal-form analysis failed: {}", e))
    })
    .context("Normal-form analysis failed")?;

    for recommendation in &recommendations {
        println!("-- {}\n{}", recommendation.advisor, recommendation.script);
    }

    if args.report {
        let summary = serde_json::json!({
            "load": report,
            "recommendations": recommendations,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
