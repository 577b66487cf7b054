use super::Host;
use super::common::{DataArgs, select_peers};
use crate::Result;
use crate::comparison::{mode_breakdown, national_trend};
use crate::dataset::{AgencyId, Dataset};
use crate::metrics::TrendMetric;
use crate::reports::{write_mode_breakdown, write_national_trend};
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ModesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// NTD identifier of the home agency
    #[arg(long, value_name = "NTD_ID")]
    pub home: AgencyId,

    /// A peer to break down, up to 19 [default: the most similar agencies per the configuration]
    #[arg(long = "peer", value_name = "NTD_ID")]
    pub peers: Vec<AgencyId>,

    /// The metric to break down
    #[arg(long, value_enum, value_name = "METRIC", default_value_t = TrendMetric::Ridership)]
    pub metric: TrendMetric,

    /// Skip the national per-mode context
    #[arg(long)]
    pub no_national: bool,
}

pub fn break_down_modes<H: Host>(host: &mut H, args: &ModesArgs) -> Result<()> {
    let (
        Dataset {
            universe,
            modes,
            national,
            metadata,
            ..
        },
        config,
    ) = args.data.load()?;
    let (universe, selection) = select_peers(universe, &config, args.home, &args.peers)?;

    let breakdown = mode_breakdown(&universe, &modes, &selection, args.metric)?;

    let colors = args.data.colors();
    let mut out = host.output();
    if let Some(year) = metadata.latest_year {
        writeln!(out, "Report year: {year}")?;
    }
    write_mode_breakdown(&mut out, &breakdown, colors)?;

    if !args.no_national {
        let trend = national_trend(&national, &breakdown.modes, args.metric);
        writeln!(out)?;
        write_national_trend(&mut out, &trend, colors)?;
    }

    Ok(())
}
