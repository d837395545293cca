//! CLI argument definitions for the measurement view host.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mtv_core::{ExportFormat, ToothSystem};
use mtv_model::{ActionCommand, SortKey};

#[derive(Parser)]
#[command(
    name = "mtv",
    version,
    about = "Measurement table viewer - filter, sort and export tracked measurements",
    long_about = "Render, filter, sort and export a host's tracked measurements.\n\n\
                  Records are read from a JSON array. Actions are printed as the\n\
                  JSON events a host would receive."
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

    /// Allow measurement labels and values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Category table (TOML) replacing the built-in dental categories.
    #[arg(long = "categories", value_name = "PATH", global = true)]
    pub categories: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the measurement table.
    View(ViewArgs),

    /// List filter categories (or the category table when no records are given).
    Categories(CategoriesArgs),

    /// Export the current view to a file.
    Export(ExportArgs),

    /// Dispatch a row action or category button and print the forwarded event.
    Dispatch(DispatchArgs),

    /// List tooth numbers of a numbering system.
    Teeth(TeethArgs),
}

/// Record source plus the view state to apply.
#[derive(Args)]
pub struct ViewOptions {
    /// JSON file holding an array of measurement records.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Sort key.
    #[arg(long = "sort", value_enum, default_value = "label")]
    pub sort: SortKeyArg,

    /// Sort descending instead of ascending.
    #[arg(long = "descending")]
    pub descending: bool,

    /// Show only records of this category (default: all).
    #[arg(long = "filter", value_name = "CATEGORY")]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub view: ViewOptions,

    /// Panel title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Hide editing actions and category buttons.
    #[arg(long = "disable-editing")]
    pub disable_editing: bool,
}

#[derive(Args)]
pub struct CategoriesArgs {
    /// JSON file holding an array of measurement records.
    #[arg(value_name = "RECORDS")]
    pub records: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewOptions,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Args)]
pub struct DispatchArgs {
    /// JSON file holding an array of measurement records.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Row action to dispatch.
    #[arg(long = "action", value_enum, requires = "uid", conflicts_with = "add")]
    pub action: Option<RowActionArg>,

    /// Uid of the target measurement.
    #[arg(long = "uid")]
    pub uid: Option<String>,

    /// Press the category button with this label.
    #[arg(long = "add", value_name = "CATEGORY", required_unless_present = "action")]
    pub add: Option<String>,

    /// Suppress edits the way a read-only panel does.
    #[arg(long = "disable-editing")]
    pub disable_editing: bool,

    /// Tool group passed to tool activation.
    #[arg(long = "tool-group", default_value = mtv_core::DEFAULT_TOOL_GROUP)]
    pub tool_group: String,
}

#[derive(Args)]
pub struct TeethArgs {
    /// Numbering system.
    #[arg(long = "system", value_enum, default_value = "fdi")]
    pub system: ToothSystemArg,

    /// Check that a tooth number exists in the system.
    #[arg(long = "select", value_name = "TOOTH")]
    pub select: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKeyArg {
    Index,
    Label,
    Value,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Index => SortKey::Index,
            SortKeyArg::Label => SortKey::Label,
            SortKeyArg::Value => SortKey::Value,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RowActionArg {
    Select,
    Rename,
    ToggleVisibility,
    ToggleLock,
    Recolor,
    Remove,
}

impl From<RowActionArg> for ActionCommand {
    fn from(arg: RowActionArg) -> Self {
        match arg {
            RowActionArg::Select => ActionCommand::SelectMeasurement,
            RowActionArg::Rename => ActionCommand::RenameMeasurement,
            RowActionArg::ToggleVisibility => ActionCommand::ToggleVisibility,
            RowActionArg::ToggleLock => ActionCommand::ToggleLock,
            RowActionArg::Recolor => ActionCommand::RecolorMeasurement,
            RowActionArg::Remove => ActionCommand::RemoveMeasurement,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToothSystemArg {
    Fdi,
    Universal,
}

impl From<ToothSystemArg> for ToothSystem {
    fn from(arg: ToothSystemArg) -> Self {
        match arg {
            ToothSystemArg::Fdi => ToothSystem::Fdi,
            ToothSystemArg::Universal => ToothSystem::Universal,
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
