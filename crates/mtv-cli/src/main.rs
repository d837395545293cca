//! Measurement table viewer CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mtv_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use mtv_cli::commands::{
    load_table, run_categories, run_dispatch, run_export, run_teeth, run_view,
};
use mtv_cli::logging::{LogConfig, LogFormat, init_logging};
use mtv_core::Dispatch;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let table = load_table(cli.categories.as_deref())?;
    match &cli.command {
        Command::View(args) => {
            let outcome = run_view(args, table)?;
            print!("{}", outcome.output);
        }
        Command::Categories(args) => {
            println!("{}", run_categories(args, &table)?);
        }
        Command::Export(args) => {
            let outcome = run_export(args, table)?;
            match (outcome.artifact, outcome.path) {
                (Some(artifact), Some(path)) => {
                    println!("Exported {} measurements to {}", artifact.entries, path.display());
                }
                _ => println!("Nothing to export"),
            }
        }
        Command::Dispatch(args) => {
            let outcome = run_dispatch(args, table)?;
            for (tool, group) in &outcome.activations {
                eprintln!("tool activated: {tool} ({group})");
            }
            for event in &outcome.events {
                println!("{}", serde_json::to_string(event)?);
            }
            if outcome.dispatch == Dispatch::Suppressed {
                eprintln!("suppressed: editing is disabled");
            }
        }
        Command::Teeth(args) => {
            println!("{}", run_teeth(args)?.join(" "));
        }
    }
    Ok(())
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
