//! Check command implementation

use anyhow::Result;

use crate::cli::{CheckArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Print whether the SQL parses; malformed SQL is an answer, not an error
pub fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let sql = ctx.read_sql(&args.input)?;
    let parsable = ctx.tools.is_parsable(&sql);
    if !parsable {
        if let Err(e) = ctx.tools.parser().parse(&sql) {
            ctx.verbose(&e.to_string());
        }
    }
    println!("{}", parsable);
    Ok(())
}
