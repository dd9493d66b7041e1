//! CLI argument definitions for the tabular importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "tabmap",
    version,
    about = "Map CSV and Excel files onto typed record schemas",
    long_about = "Map the columns of CSV and Excel files onto typed record schemas.\n\n\
                  Suggests column mappings, reports mapping problems on sample rows,\n\
                  and converts whole files into validated JSON records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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

    /// Allow cell values in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding Schemas.csv and Fields.csv (default: built-in schemas,
    /// or $TABMAP_SCHEMA_DIR when set).
    #[arg(long = "schema-dir", value_name = "DIR", global = true)]
    pub schema_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available schemas.
    Schemas,

    /// Show the fields of one schema.
    Schema(SchemaArgs),

    /// Show the first rows of a file.
    Preview(PreviewArgs),

    /// Suggest a column mapping for a file.
    Suggest(SuggestArgs),

    /// Check a mapping against the schema and sample rows.
    Check(CheckArgs),

    /// Validate every row and write processed and rejected records.
    Process(ProcessArgs),

    /// Manage saved import sessions.
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Schema name (case-insensitive).
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// CSV or Excel file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of data rows to show.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Target schema.
    #[arg(long = "schema", value_name = "NAME")]
    pub schema: String,

    /// Write the suggested mapping as JSON.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also list the closest fields for every column.
    #[arg(long = "alternatives", value_name = "N")]
    pub alternatives: Option<usize>,
}

/// Where the mapping for `check` and `process` comes from.
#[derive(Args)]
pub struct MappingSourceArgs {
    /// Mapping JSON file (`{"column": "field" | null}`).
    #[arg(long = "mapping", value_name = "PATH", conflicts_with = "session")]
    pub mapping: Option<PathBuf>,

    /// Use the mapping stored in a session.
    #[arg(long = "session", value_name = "ID")]
    pub session: Option<Uuid>,

    /// Session storage directory.
    #[arg(long = "session-dir", value_name = "DIR", default_value = DEFAULT_SESSION_DIR)]
    pub session_dir: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "schema", value_name = "NAME")]
    pub schema: String,

    #[command(flatten)]
    pub source: MappingSourceArgs,

    /// Number of leading rows to validate.
    #[arg(long = "sample-rows", default_value_t = tabmap_validate::DEFAULT_SAMPLE_ROWS)]
    pub sample_rows: usize,
}

#[derive(Args)]
pub struct ProcessArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "schema", value_name = "NAME")]
    pub schema: String,

    #[command(flatten)]
    pub source: MappingSourceArgs,

    /// Output directory (default: <FILE directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate rows in parallel.
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

pub const DEFAULT_SESSION_DIR: &str = ".tabmap/sessions";

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Start a session for a file, optionally selecting a schema.
    Start(SessionStartArgs),

    /// Select a different schema and re-suggest the mapping.
    Schema(SessionSchemaArgs),

    /// Point a column at a field, or unmap it when FIELD is omitted.
    Map(SessionMapArgs),

    /// Show a session and its mapping.
    Show(SessionIdArgs),

    /// List saved sessions.
    List(SessionDirArgs),

    /// Delete a session.
    Delete(SessionIdArgs),
}

#[derive(Args)]
pub struct SessionDirArgs {
    #[arg(long = "session-dir", value_name = "DIR", default_value = DEFAULT_SESSION_DIR)]
    pub session_dir: PathBuf,
}

#[derive(Args)]
pub struct SessionStartArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Select a schema and fill the mapping with suggestions.
    #[arg(long = "schema", value_name = "NAME")]
    pub schema: Option<String>,

    #[command(flatten)]
    pub dir: SessionDirArgs,
}

#[derive(Args)]
pub struct SessionSchemaArgs {
    #[arg(value_name = "ID")]
    pub id: Uuid,

    /// Schema name (case-insensitive).
    #[arg(value_name = "NAME")]
    pub schema: String,

    #[command(flatten)]
    pub dir: SessionDirArgs,
}

#[derive(Args)]
pub struct SessionMapArgs {
    #[arg(value_name = "ID")]
    pub id: Uuid,

    #[arg(value_name = "COLUMN")]
    pub column: String,

    #[arg(value_name = "FIELD")]
    pub field: Option<String>,

    #[command(flatten)]
    pub dir: SessionDirArgs,
}

#[derive(Args)]
pub struct SessionIdArgs {
    #[arg(value_name = "ID")]
    pub id: Uuid,

    #[command(flatten)]
    pub dir: SessionDirArgs,
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
