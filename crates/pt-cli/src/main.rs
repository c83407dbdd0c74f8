//! ptools - structural facts about SQL, extracted without running it

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod context;

use cli::Cli;
use commands::{check, extract};
use pt_sql::{DetailedWhereExtractor, StatementExtractor, WhereExtractor};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Statements(args) => extract::execute(StatementExtractor, args, &cli.global),
        cli::Commands::Tables(args) => extract::execute_tables(args, &cli.global),
        cli::Commands::Where(args) => extract::execute(WhereExtractor, args, &cli.global),
        cli::Commands::WhereDetailed(args) => {
            extract::execute(DetailedWhereExtractor, args, &cli.global)
        }
        cli::Commands::Functions(args) => extract::execute_functions(args, &cli.global),
        cli::Commands::Check(args) => check::execute(args, &cli.global),
    }
}
