//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// ptools - Extract statements, tables, predicates and function calls from SQL
#[derive(Parser, Debug)]
#[command(name = "ptools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: ./ptools.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override SQL dialect (duckdb, snowflake, postgres, generic)
    #[arg(short, long, global = true)]
    pub dialect: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split SQL into statements and print each one re-serialized
    Statements(ExtractArgs),

    /// List tables read or written, with their position
    Tables(TablesArgs),

    /// List filter conjuncts from WHERE, HAVING, JOIN ON and QUALIFY
    Where(ExtractArgs),

    /// List `column <op> literal` filter conjuncts
    WhereDetailed(ExtractArgs),

    /// List function call sites
    Functions(FunctionsArgs),

    /// Check whether SQL parses (prints true or false)
    Check(CheckArgs),
}

/// Where the SQL text comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// SQL text (default: read from --file or stdin)
    pub sql: Option<String>,

    /// Read SQL from a file
    #[arg(short, long, conflicts_with = "sql")]
    pub file: Option<PathBuf>,
}

/// How results are shaped and printed
#[derive(Args, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// Result shape (default: from config, else rows)
    #[arg(short, long, value_enum)]
    pub mode: Option<OutputMode>,

    /// Output format (default: from config, else table)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Arguments shared by the record-producing commands
#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub shape: ShapeArgs,
}

/// Arguments for the tables command
#[derive(Args, Debug)]
pub struct TablesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Print distinct qualified names instead of records
    #[arg(long)]
    pub names: bool,

    /// With --names, drop CTEs and subquery aliases
    #[arg(long, requires = "names")]
    pub exclude_cte: bool,
}

/// Arguments for the functions command
#[derive(Args, Debug)]
pub struct FunctionsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Print distinct function names instead of records
    #[arg(long)]
    pub names: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Result shapes
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One row per record
    #[default]
    Rows,
    /// All records as one list
    List,
    /// Number of records
    Count,
}

/// Output formats
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
