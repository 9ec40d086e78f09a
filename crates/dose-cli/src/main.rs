//! Effective dose worksheet CLI.

use clap::{ColorChoice, Parser};
use dose_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use dose_cli::commands::{
    run_add_extremity, run_add_nuclide, run_add_task, run_fields, run_get, run_header, run_init,
    run_nuclides, run_remove_extremity, run_remove_nuclide, run_remove_task, run_set, run_show,
};
use dose_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let nuclide_table = cli.nuclide_table.clone();
    let result = match &cli.command {
        Command::Init(args) => run_init(args, nuclide_table),
        Command::Header(args) => run_header(args),
        Command::AddTask(args) => run_add_task(args),
        Command::RemoveTask(args) => run_remove_task(args),
        Command::Set(args) => run_set(args, nuclide_table),
        Command::Get(args) => run_get(args),
        Command::AddNuclide(args) => run_add_nuclide(args),
        Command::RemoveNuclide(args) => run_remove_nuclide(args),
        Command::AddExtremity(args) => run_add_extremity(args),
        Command::RemoveExtremity(args) => run_remove_extremity(args),
        Command::Show(args) => run_show(args),
        Command::Fields => run_fields(),
        Command::Nuclides(args) => run_nuclides(args, nuclide_table),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
    if let Some(level) = cli.log_level {
        config = config.with_explicit_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    } else if cli.verbosity.is_present() {
        config.use_env_filter = false;
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_ansi(with_ansi)
}
