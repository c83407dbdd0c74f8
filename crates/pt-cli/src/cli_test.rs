use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_tables_with_global_flags() {
    let cli = Cli::try_parse_from([
        "ptools",
        "tables",
        "SELECT * FROM t",
        "--names",
        "--exclude-cte",
        "-d",
        "snowflake",
        "-o",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.global.dialect.as_deref(), Some("snowflake"));
    let Commands::Tables(args) = cli.command else {
        panic!("expected tables command");
    };
    assert_eq!(args.input.sql.as_deref(), Some("SELECT * FROM t"));
    assert!(args.names && args.exclude_cte);
    assert_eq!(args.shape.output, Some(OutputFormat::Json));
    assert_eq!(args.shape.mode, None);
}

#[test]
fn test_exclude_cte_requires_names() {
    assert!(Cli::try_parse_from(["ptools", "tables", "--exclude-cte", "SELECT 1"]).is_err());
}

#[test]
fn test_sql_and_file_conflict() {
    assert!(Cli::try_parse_from(["ptools", "where", "SELECT 1", "-f", "q.sql"]).is_err());
}

#[test]
fn test_where_detailed_subcommand_name() {
    let cli = Cli::try_parse_from(["ptools", "where-detailed", "-m", "count"]).unwrap();
    let Commands::WhereDetailed(args) = cli.command else {
        panic!("expected where-detailed command");
    };
    assert_eq!(args.shape.mode, Some(OutputMode::Count));
    assert!(args.input.sql.is_none());
}
