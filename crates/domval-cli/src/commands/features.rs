//! Features command implementation.

use crate::cli::ValueArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the features command.
pub async fn execute_features(args: ValueArgs, formatter: &Formatter) -> Result<()> {
    let domain = args.domain.to_input(&args.name)?;
    let market = args.market.to_context();

    let features = domval_valuator::current().features(&domain, &market)?;

    println!("{}", formatter.format_features(domain.name(), &features)?);

    Ok(())
}
