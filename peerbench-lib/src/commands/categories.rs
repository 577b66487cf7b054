use super::Host;
use super::common::DataArgs;
use crate::Result;
use crate::reports::write_categories;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

pub fn list_categories<H: Host>(host: &mut H, args: &CategoriesArgs) -> Result<()> {
    let (dataset, _) = args.data.load()?;

    let mut out = host.output();
    write_categories(&mut out, &dataset.universe.categories(), args.data.colors())?;

    let years = dataset.reporting_years();
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        match dataset.latest_year() {
            Some(latest) => writeln!(out, "Reporting years: {first}-{last} (latest {latest})")?,
            None => writeln!(out, "Reporting years: {first}-{last}")?,
        }
    }

    Ok(())
}
