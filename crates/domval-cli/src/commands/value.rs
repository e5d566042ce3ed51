//! Value command implementation.

use crate::cli::ValueArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the value command.
pub async fn execute_value(args: ValueArgs, formatter: &Formatter) -> Result<()> {
    let domain = args.domain.to_input(&args.name)?;
    let market = args.market.to_context();

    let result = domval_valuator::valuate(domain, market).await?;

    println!("{}", formatter.format_valuation(&result)?);

    Ok(())
}
