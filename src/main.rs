//! CLI entry point for the violations summarizer.
//!
//! Loads the parking and camera violations table once, then prints the
//! per-state summary or exports every table the dashboard consumes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use violations_summary::{
    analyzers::figures::Dashboard,
    config::Config,
    output::{
        print_pretty, write_file, write_json, write_records_csv, write_summaries_csv, write_table,
    },
    pipeline::initialize,
};

#[derive(Parser)]
#[command(name = "violations_summary")]
#[command(about = "Summarize parking and camera violations by state", long_about = None)]
struct Cli {
    /// Drop records whose issue date cannot be parsed instead of failing
    #[arg(long, global = true, default_value_t = false)]
    skip_invalid_dates: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or save the per-state summary table
    Summary {
        /// Path or URL of the violations CSV (overrides VIOLATIONS_SOURCE)
        #[arg(short, long)]
        source: Option<String>,

        /// File to write instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Write the augmented records, state summary and dashboard data to a directory
    Export {
        /// Path or URL of the violations CSV (overrides VIOLATIONS_SOURCE)
        #[arg(short, long)]
        source: Option<String>,

        /// Directory to write the tables to
        #[arg(short, long, default_value = "out")]
        dir: PathBuf,

        /// Gzip compress the written files
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/violations.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("violations.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_skip_invalid_dates(cli.skip_invalid_dates);

    match cli.command {
        Commands::Summary {
            source,
            output,
            format,
        } => {
            let config = config.with_source(source);
            let tables = initialize(&config)?;
            print_pretty(&tables.summaries);

            let render = |w: &mut dyn std::io::Write| match format {
                Format::Table => write_table(w, &tables.summaries),
                Format::Json => write_json(w, &tables.summaries),
                Format::Csv => write_summaries_csv(w, &tables.summaries),
            };

            match output {
                Some(path) => {
                    write_file(&path, false, render)?;
                    info!(path = %path.display(), "State summary written");
                }
                None => render(&mut std::io::stdout().lock())?,
            }
        }
        Commands::Export { source, dir, gzip } => {
            let config = config.with_source(source);
            let tables = initialize(&config)?;
            export(&dir, gzip, &tables)?;
        }
    }

    Ok(())
}

/// Writes `records.csv`, `state_summary.csv` and `dashboard.json` into `dir`.
#[tracing::instrument(skip(tables), fields(dir = %dir.display()))]
fn export(dir: &Path, gzip: bool, tables: &violations_summary::pipeline::Tables) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let ext = if gzip { ".gz" } else { "" };
    let dashboard = Dashboard::build(&tables.records, &tables.summaries);

    write_file(&dir.join(format!("records.csv{ext}")), gzip, |w| {
        write_records_csv(w, &tables.records)
    })?;
    write_file(&dir.join(format!("state_summary.csv{ext}")), gzip, |w| {
        write_summaries_csv(w, &tables.summaries)
    })?;
    write_file(&dir.join(format!("dashboard.json{ext}")), gzip, |w| {
        write_json(w, &dashboard)
    })?;

    info!(
        records = tables.records.len(),
        states = tables.summaries.len(),
        "Export complete"
    );
    Ok(())
}
