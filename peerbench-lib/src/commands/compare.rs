use super::Host;
use super::common::{DataArgs, select_peers};
use crate::Result;
use crate::comparison::compare;
use crate::dataset::{AgencyId, Dataset};
use crate::metrics::TrendMetric;
use crate::reports::write_comparison;
use clap::Args;

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// NTD identifier of the home agency
    #[arg(long, value_name = "NTD_ID")]
    pub home: AgencyId,

    /// A peer to compare against, up to 19 [default: the most similar agencies per the configuration]
    #[arg(long = "peer", value_name = "NTD_ID")]
    pub peers: Vec<AgencyId>,

    /// The metric to compare
    #[arg(long, value_enum, value_name = "METRIC", default_value_t = TrendMetric::Ridership)]
    pub metric: TrendMetric,
}

pub fn compare_agencies<H: Host>(host: &mut H, args: &CompareArgs) -> Result<()> {
    let (Dataset { universe, yearly, .. }, config) = args.data.load()?;
    let (universe, selection) = select_peers(universe, &config, args.home, &args.peers)?;

    let comparison = compare(&universe, &yearly, &selection, args.metric)?;
    write_comparison(&mut host.output(), &comparison, args.data.colors())?;

    Ok(())
}
