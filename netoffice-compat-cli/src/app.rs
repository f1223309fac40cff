use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nocompat - which Office versions support a NetOffice type, member or enum value
#[derive(Debug, Parser)]
#[command(name = "nocompat", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load support tables from this directory instead of the embedded ones.
    #[arg(long, global = true, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Additionally recognize this attribute as a support annotation (repeatable).
    #[arg(long, global = true, value_name = "NAME")]
    pub attribute: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Versions supporting a member call, e.g. NetOffice.ExcelApi.Range::get_Value().
    Member {
        /// Qualified call identifier.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Versions supporting a type, e.g. NetOffice.WordApi.Document.
    Type {
        /// Qualified type name.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Name and supporting versions of an enum value.
    Enum {
        /// Qualified enum type name.
        #[arg(value_name = "NAME")]
        name: String,

        /// Integral value of the enum member.
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: i64,
    },

    /// List the loaded libraries.
    Libraries,

    /// List the types of a library.
    Types {
        /// Library tag, e.g. Excel or ExcelApi.
        #[arg(value_name = "LIBRARY")]
        library: String,

        /// Show only types whose name contains this text (case-insensitive).
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Print a loaded library as a JSON listing.
    Dump {
        /// Library tag, e.g. Excel or ExcelApi.
        #[arg(value_name = "LIBRARY")]
        library: String,
    },

    /// Pack a JSON listing into a compressed support table.
    Pack {
        /// Path to the JSON listing.
        #[arg(value_name = "LISTING")]
        listing: PathBuf,

        /// Output file, conventionally <Library>Api.dll.gz.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}
