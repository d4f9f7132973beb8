//! CLI argument definitions for the PyAEZ soil exporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use hwsd_output::ExportFormat;

#[derive(Parser)]
#[command(
    name = "hwsd-pyaez",
    version,
    about = "Export HWSD2 soil profiles as PyAEZ soil tables",
    long_about = "Extract soil profiles for a set of soil mapping units from the HWSD2 \
                  SQLite database, consolidate them per depth layer (D1-D7) and write \
                  the PyAEZ soil characteristics table (XLSX or CSV)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate soil layers and write the PyAEZ table.
    Export(ExportArgs),

    /// Print the HWSD2 reference tables used by the export.
    Lookups(LookupArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the HWSD2 SQLite database.
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Soil mapping unit ids (repeatable, comma separated).
    ///
    /// Without --smu-id or --ids-file the 31 Eswatini units are exported.
    #[arg(long = "smu-id", value_name = "ID")]
    pub smu_ids: Vec<String>,

    /// File listing soil mapping unit ids (CSV or one per line).
    #[arg(long = "ids-file", value_name = "PATH")]
    pub ids_file: Option<PathBuf>,

    /// Depth layers to process (default: D1 through D7).
    #[arg(long = "layers", value_name = "LAYER", value_delimiter = ',')]
    pub layers: Vec<String>,

    /// Output file (default: <DATABASE dir>/soil_ALL_LAYERS_pyaez.xlsx).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, else xlsx).
    #[arg(long = "format", value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Also write one file per layer next to the combined output.
    #[arg(long = "per-layer")]
    pub per_layer: bool,

    /// Write the export statistics as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Consolidate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Path to the HWSD2 SQLite database.
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Xlsx,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Xlsx => ExportFormat::Xlsx,
            ExportFormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
