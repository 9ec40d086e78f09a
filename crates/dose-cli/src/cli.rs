//! CLI argument definitions for the effective dose worksheet.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dose-worksheet",
    version,
    about = "Effective dose assessment worksheet",
    long_about = "Edit radiological work assessments and recompute their dose estimates.\n\n\
                  Worksheets are JSON documents holding one or more tasks. Every edit\n\
                  recomputes external, extremity and internal dose, DAC fractions and\n\
                  posting requirements for the affected task."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Nuclide reference table to use instead of the embedded one.
    ///
    /// Falls back to the DOSE_NUCLIDE_TABLE environment variable.
    #[arg(long = "nuclide-table", value_name = "CSV", global = true)]
    pub nuclide_table: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new worksheet with one empty task.
    Init(InitArgs),

    /// Set the worksheet's WCD and RWP numbers.
    Header(HeaderArgs),

    /// Append a task to the worksheet.
    AddTask(AddTaskArgs),

    /// Remove a task from the worksheet.
    RemoveTask(TaskArgs),

    /// Edit one field of a task and recompute it.
    Set(SetArgs),

    /// Print the current value of one field.
    Get(GetArgs),

    /// Add a radionuclide source term to a task.
    AddNuclide(TaskArgs),

    /// Remove a radionuclide source term from a task.
    RemoveNuclide(EntryArgs),

    /// Add an extremity dose entry to a task.
    AddExtremity(TaskArgs),

    /// Remove an extremity dose entry from a task.
    RemoveExtremity(EntryArgs),

    /// Show worksheet totals or the details of one task.
    Show(ShowArgs),

    /// List every editable field path.
    Fields,

    /// List the nuclide reference table.
    Nuclides(NuclidesArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Path of the worksheet file to create.
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    #[arg(long = "wcd", value_name = "NUMBER", default_value = "")]
    pub wcd_number: String,

    #[arg(long = "rwp", value_name = "NUMBER", default_value = "")]
    pub rwp_number: String,

    /// Overwrite an existing file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Args)]
pub struct HeaderArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    #[arg(long = "wcd", value_name = "NUMBER")]
    pub wcd_number: Option<String>,

    #[arg(long = "rwp", value_name = "NUMBER")]
    pub rwp_number: Option<String>,
}

#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    /// Title of the new task (default: "New Task <n>").
    #[arg(long = "title")]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct TaskArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    /// Task identifier, e.g. task-1.
    #[arg(value_name = "TASK")]
    pub task: String,
}

#[derive(Args)]
pub struct EntryArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    #[arg(value_name = "TASK")]
    pub task: String,

    /// Entry identifier, e.g. nuc-2 or ext-1.
    #[arg(value_name = "ENTRY")]
    pub entry: String,
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    #[arg(value_name = "TASK")]
    pub task: String,

    /// Field path, e.g. time.num_workers or radionuclide.nuc-1.contamination.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// New value. Empty numeric input clears the field to zero.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Args)]
pub struct GetArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    #[arg(value_name = "TASK")]
    pub task: String,

    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    /// Show the details of one task instead of the worksheet totals.
    #[arg(long = "task", value_name = "TASK")]
    pub task: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct NuclidesArgs {
    /// Only list nuclides whose key or name contains this text.
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,
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
