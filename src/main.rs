//! bulkctl - drive bulk operations against an inventory admin API
//!
//! Terminal counterpart of the admin UI's bulk toolbar: the same engine,
//! fed from flags and id files instead of row checkboxes.

use bulkhub_rs::{
    AdjustmentMode, AdminApiClient, BatchSubmitter, BulkAction, BulkError, BulkJob, CancelHandle,
    Config, ExportFormat, ExportRequest, FieldChanges, FixedDelayPacer, JobStatus, LogReporter,
    RecordId, StockAdjustment,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bulkctl", version, about = "Bulk operations for the inventory admin API")]
struct Cli {
    /// Configuration file; falls back to BULKHUB_* environment variables
    #[arg(long, global = true, env = "BULKHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated record ids
    #[arg(long, global = true, value_delimiter = ',')]
    ids: Vec<String>,

    /// File with one record id per line
    #[arg(long, global = true)]
    ids_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set fields on every selected record
    Update {
        /// field=value pair; repeatable. Values parse as JSON, falling
        /// back to plain strings.
        #[arg(long = "set", required = true)]
        set: Vec<String>,
    },
    /// Set price fields on every selected record
    UpdatePrices {
        /// field=value pair; repeatable
        #[arg(long = "set", required = true)]
        set: Vec<String>,
    },
    /// Adjust stock one record at a time
    AdjustStock {
        #[arg(long, value_enum)]
        mode: ModeArg,
        #[arg(long)]
        quantity: u32,
        /// Audit reason recorded with each stock movement
        #[arg(long)]
        reason: String,
        #[arg(long)]
        location: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Activate the selected records
    Activate,
    /// Deactivate the selected records
    Deactivate,
    /// Export the selection as a file download
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: FormatArg,
        /// Where the download is written
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Set,
    Add,
    Subtract,
}

impl From<ModeArg> for AdjustmentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Set => AdjustmentMode::Set,
            ModeArg::Add => AdjustmentMode::Add,
            ModeArg::Subtract => AdjustmentMode::Subtract,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(job) => {
            println!("{}", job.summary());
            for failure in &job.failures {
                eprintln!("  record {}: {}", failure.record, failure.message);
            }
            if job.status == JobStatus::Completed && job.failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> bulkhub_rs::Result<BulkJob> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let records = collect_ids(&cli).await?;
    let action = build_action(cli.command)?;

    let client = Arc::new(AdminApiClient::new(&config.api)?);
    let mut submitter = BatchSubmitter::new(client)
        .with_max_consecutive_failures(config.batch.max_consecutive_failures);
    if matches!(action, BulkAction::AdjustStock(_)) {
        submitter = submitter.with_pacer(Arc::new(FixedDelayPacer::new(Duration::from_millis(
            config.batch.stock_adjust_pause_ms,
        ))));
    }

    // Ctrl-C stops the run at the next chunk boundary.
    let cancel = CancelHandle::new();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    submitter.run(records, action, &LogReporter::new(), &cancel).await
}

async fn collect_ids(cli: &Cli) -> bulkhub_rs::Result<Vec<RecordId>> {
    let mut records: Vec<RecordId> = cli
        .ids
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| RecordId::parse(raw))
        .collect();

    if let Some(path) = &cli.ids_file {
        let content = tokio::fs::read_to_string(path).await?;
        records.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(RecordId::parse),
        );
    }

    Ok(records)
}

fn build_action(command: Command) -> bulkhub_rs::Result<BulkAction> {
    match command {
        Command::Update { set } => Ok(BulkAction::UpdateFields(parse_field_changes(&set)?)),
        Command::UpdatePrices { set } => Ok(BulkAction::UpdatePrices(parse_field_changes(&set)?)),
        Command::AdjustStock {
            mode,
            quantity,
            reason,
            location,
            notes,
        } => Ok(BulkAction::AdjustStock(StockAdjustment {
            mode: mode.into(),
            quantity,
            location_id: location,
            reason,
            notes,
        })),
        Command::Activate => Ok(BulkAction::SetActive(true)),
        Command::Deactivate => Ok(BulkAction::SetActive(false)),
        Command::Export { format, output } => Ok(BulkAction::Export(ExportRequest {
            format: format.into(),
            destination: output,
        })),
    }
}

/// Parse repeated `field=value` flags; values are JSON when they parse,
/// plain strings otherwise.
fn parse_field_changes(pairs: &[String]) -> bulkhub_rs::Result<FieldChanges> {
    let mut changes = FieldChanges::new();
    for pair in pairs {
        let (field, value) = pair.split_once('=').ok_or_else(|| {
            BulkError::validation(format!("Expected field=value, got '{}'", pair))
        })?;
        if field.is_empty() {
            return Err(BulkError::validation(format!(
                "Missing field name in '{}'",
                pair
            )));
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        changes.insert(field.to_string(), value);
    }
    Ok(changes)
}
