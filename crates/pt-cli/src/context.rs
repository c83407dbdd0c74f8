//! Runtime context for CLI commands

use anyhow::{Context, Result};
use pt_sql::{ParserTools, SqlDialect};
use std::io::Read;

use crate::cli::{GlobalArgs, InputArgs, OutputFormat, OutputMode, ShapeArgs};
use crate::config::Config;

/// Runtime context containing the resolved configuration and parser
pub struct RuntimeContext {
    /// Extraction tools bound to the effective dialect
    pub tools: ParserTools,

    /// Loaded configuration (defaults when no file exists)
    pub config: Config,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let config = Config::resolve(args.config.as_deref())
            .context("Failed to load configuration file")?;
        log::debug!("Effective config: {:?}", config);

        let dialect: SqlDialect = match &args.dialect {
            Some(name) => name.parse().context("Invalid SQL dialect")?,
            None => config.dialect,
        };

        let ctx = Self {
            tools: ParserTools::new(dialect),
            config,
            verbose: args.verbose,
        };
        ctx.verbose(&format!("Using {} dialect", dialect));
        Ok(ctx)
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Effective result shape: flags first, then config
    pub fn shape(&self, args: &ShapeArgs) -> (OutputMode, OutputFormat) {
        (
            args.mode.unwrap_or(self.config.mode),
            args.output.unwrap_or(self.config.output),
        )
    }

    /// Read SQL from the positional argument, `--file`, or stdin
    pub fn read_sql(&self, input: &InputArgs) -> Result<String> {
        if let Some(sql) = &input.sql {
            return Ok(sql.clone());
        }
        if let Some(path) = &input.file {
            self.verbose(&format!("Reading SQL from {}", path.display()));
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read SQL file: {}", path.display()));
        }
        self.verbose("Reading SQL from stdin");
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .context("Failed to read SQL from stdin")?;
        Ok(sql)
    }
}
