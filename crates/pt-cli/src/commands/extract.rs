//! Record-producing commands: statements, tables, where, where-detailed, functions

use anyhow::Result;
use pt_sql::{Extractor, FunctionExtractor, TableExtractor};

use crate::cli::{
    ExtractArgs, FunctionsArgs, GlobalArgs, InputArgs, OutputMode, ShapeArgs, TablesArgs,
};
use crate::commands::common::{render_list, render_names, render_rows};
use crate::context::RuntimeContext;

/// Execute an extraction command over one SQL input
pub fn execute<E: Extractor>(extractor: E, args: &ExtractArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    run(&ctx, extractor, &args.input, &args.shape)
}

/// Execute the tables command
pub fn execute_tables(args: &TablesArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    if !args.names {
        return run(&ctx, TableExtractor, &args.input, &args.shape);
    }
    let sql = ctx.read_sql(&args.input)?;
    let names = ctx.tools.table_names(&sql, args.exclude_cte);
    print_names(&ctx, &names, &args.shape)
}

/// Execute the functions command
pub fn execute_functions(args: &FunctionsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    if !args.names {
        return run(&ctx, FunctionExtractor, &args.input, &args.shape);
    }
    let sql = ctx.read_sql(&args.input)?;
    let names = ctx.tools.function_names(&sql);
    print_names(&ctx, &names, &args.shape)
}

fn run<E: Extractor>(
    ctx: &RuntimeContext,
    extractor: E,
    input: &InputArgs,
    shape: &ShapeArgs,
) -> Result<()> {
    let sql = ctx.read_sql(input)?;
    let (mode, format) = ctx.shape(shape);
    let kind = <E::Record as pt_sql::Record>::KIND;

    if ctx.verbose && !ctx.tools.is_parsable(&sql) {
        ctx.verbose("SQL did not parse; reporting no results");
    }

    let output = match mode {
        OutputMode::Rows => {
            let cursor = ctx.tools.rows(extractor, &sql);
            render_rows(cursor, format)?
        }
        OutputMode::List => render_list(&ctx.tools.list(&extractor, &sql))?,
        OutputMode::Count => format!("{}\n", ctx.tools.count(&extractor, &sql)),
    };
    ctx.verbose(&format!("Extracted {} ({:?} mode)", kind, mode));
    print!("{}", output);
    Ok(())
}

fn print_names(ctx: &RuntimeContext, names: &[String], shape: &ShapeArgs) -> Result<()> {
    let (mode, format) = ctx.shape(shape);
    let output = match mode {
        OutputMode::Rows => render_names(names, format)?,
        OutputMode::List => render_list(names)?,
        OutputMode::Count => format!("{}\n", names.len()),
    };
    print!("{}", output);
    Ok(())
}
