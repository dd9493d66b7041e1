//! `tabmap` command line tool.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tabmap_cli::logging::{LogConfig, LogFormat, init_logging};
use tabmap_cli::pipeline::build_importer;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, SessionCommand};
use crate::commands::{
    run_check, run_preview, run_process, run_schema, run_schemas, run_session_delete,
    run_session_list, run_session_map, run_session_schema, run_session_show, run_session_start,
    run_suggest,
};
use crate::summary::print_process_summary;

/// Some rows were rejected, or the mapping check failed.
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let importer = build_importer(cli.schema_dir.as_deref());
    match cli.command {
        Command::Schemas => run_schemas(&importer)?,
        Command::Schema(args) => run_schema(&importer, &args)?,
        Command::Preview(args) => run_preview(&importer, &args)?,
        Command::Suggest(args) => run_suggest(&importer, &args)?,
        Command::Check(args) => {
            if !run_check(&importer, &args)? {
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
        }
        Command::Process(args) => {
            let result = run_process(&importer, &args)?;
            print_process_summary(&result);
            if result.has_rejections() {
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
        }
        Command::Session(command) => match command {
            SessionCommand::Start(args) => run_session_start(&importer, &args)?,
            SessionCommand::Schema(args) => run_session_schema(&importer, &args)?,
            SessionCommand::Map(args) => run_session_map(&importer, &args)?,
            SessionCommand::Show(args) => run_session_show(&args)?,
            SessionCommand::List(args) => run_session_list(&args)?,
            SessionCommand::Delete(args) => run_session_delete(&args)?,
        },
    }
    Ok(ExitCode::SUCCESS)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
