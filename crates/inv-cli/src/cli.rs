//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use inv_model::CatalogKind;

#[derive(Parser)]
#[command(
    name = "boat-inventory",
    version,
    about = "Track safety equipment found during boat inspections",
    long_about = "Track safety equipment found during boat inspections.\n\n\
                  Reports group counted items into free-form sections and can be\n\
                  exported as printable HTML documents."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the inventory data (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all reports, newest first.
    Reports,

    /// Start a new report for a boat.
    Create {
        #[arg(value_name = "BOAT")]
        boat: String,
    },

    /// Show the items of a report.
    Show {
        /// Report id or a unique prefix of it.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete a report.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Add an item to a section of a report.
    Add(AddArgs),

    /// Replace the item at a position in a section.
    Edit(EditArgs),

    /// Remove the item at a position in a section.
    Remove(RemoveArgs),

    /// List remembered suggestions.
    Catalog {
        #[arg(value_enum)]
        kind: CatalogArg,

        /// Only entries starting with this text (case-insensitive).
        #[arg(long = "prefix", value_name = "TEXT")]
        prefix: Option<String>,
    },

    /// Forget a remembered suggestion. Reports keep using it.
    Forget {
        #[arg(value_enum)]
        kind: CatalogArg,

        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Export a report as an HTML document.
    Export(ExportArgs),

    /// Show the settings in effect, or write a default settings file.
    Config {
        /// Write the current settings to the settings file.
        #[arg(long = "init")]
        init: bool,
    },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(value_name = "SECTION")]
    pub section: String,

    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Counted quantity. Text after the leading number is ignored.
    #[arg(value_name = "QUANTITY", allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(value_name = "SECTION")]
    pub section: String,

    /// Position within the section, as shown by `show` (starting at 1).
    #[arg(value_name = "POSITION")]
    pub position: usize,

    #[arg(value_name = "ITEM")]
    pub item: String,

    #[arg(value_name = "QUANTITY", allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(value_name = "SECTION")]
    pub section: String,

    /// Position within the section, as shown by `show` (starting at 1).
    #[arg(value_name = "POSITION")]
    pub position: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// Directory for the document (overrides the settings file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Open the document with the system viewer once written.
    #[arg(long = "open")]
    pub open: bool,

    /// Insert names without escaping HTML markup.
    #[arg(long = "raw-markup")]
    pub raw_markup: bool,
}

/// Suggestion catalogs.
#[derive(Clone, Copy, ValueEnum)]
pub enum CatalogArg {
    Boats,
    Sections,
    Items,
}

impl From<CatalogArg> for CatalogKind {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Boats => CatalogKind::Boat,
            CatalogArg::Sections => CatalogKind::Section,
            CatalogArg::Items => CatalogKind::Item,
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
