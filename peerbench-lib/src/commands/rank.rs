use super::Host;
use super::common::{DataArgs, warn_if_rejected};
use crate::Result;
use crate::dataset::{AgencyId, ModeCode};
use crate::metrics::{SimilarityCriterion, SizeBand};
use crate::ranking::{FilterSet, RankingPipeline, TieBreak};
use crate::reports::{write_ranking, write_selection};
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// NTD identifier of the home agency
    #[arg(long, value_name = "NTD_ID")]
    pub home: AgencyId,

    /// Similarity criteria, comma separated [default: from the configuration]
    #[arg(long, value_enum, value_delimiter = ',', value_name = "CRITERION")]
    pub criteria: Vec<SimilarityCriterion>,

    /// Rank with no criteria, so every candidate ties
    #[arg(long, conflicts_with = "criteria")]
    pub no_criteria: bool,

    /// Keep agencies with any of these reporter types
    #[arg(long = "reporter-type", value_name = "TYPE")]
    pub reporter_types: Vec<String>,

    /// Keep agencies with any of these organization types
    #[arg(long = "org-type", value_name = "TYPE")]
    pub organization_types: Vec<String>,

    /// Keep agencies operating every one of these modes, e.g. MB,LR
    #[arg(long = "mode", value_delimiter = ',', value_name = "CODE")]
    pub modes: Vec<ModeCode>,

    /// Keep agencies in any of these states
    #[arg(long = "state", value_delimiter = ',', value_name = "STATE")]
    pub states: Vec<String>,

    /// Keep agencies in any of these ridership bands
    #[arg(long = "ridership-band", value_enum, value_delimiter = ',', value_name = "BAND")]
    pub ridership_bands: Vec<SizeBand>,

    /// Keep agencies in any of these population bands
    #[arg(long = "population-band", value_enum, value_delimiter = ',', value_name = "BAND")]
    pub population_bands: Vec<SizeBand>,

    /// Keep agencies whose name, city or metro area contains this text
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Select this many of the most similar candidates as peers [default: from the configuration]
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Add an agency to the peer selection
    #[arg(long = "peer", value_name = "NTD_ID")]
    pub peers: Vec<AgencyId>,

    /// How to order candidates with equal distance [default: from the configuration]
    #[arg(long, value_enum, value_name = "POLICY")]
    pub tie_break: Option<TieBreak>,

    /// Show at most this many candidates
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

impl RankArgs {
    fn filters(&self) -> FilterSet {
        FilterSet::new()
            .with_reporter_types(self.reporter_types.iter().cloned())
            .with_organization_types(self.organization_types.iter().cloned())
            .with_modes(self.modes.iter().cloned())
            .with_states(self.states.iter().cloned())
            .with_ridership_bands(self.ridership_bands.iter().copied())
            .with_population_bands(self.population_bands.iter().copied())
            .with_search(self.search.clone().unwrap_or_default())
    }
}

pub fn rank_agencies<H: Host>(host: &mut H, args: &RankArgs) -> Result<()> {
    let (dataset, config) = args.data.load()?;

    let criteria = if args.no_criteria {
        Vec::new()
    } else if args.criteria.is_empty() {
        config.criteria.clone()
    } else {
        args.criteria.clone()
    };

    let mut pipeline = RankingPipeline::new(
        dataset.universe,
        args.home,
        criteria,
        args.tie_break.unwrap_or(config.tie_break),
    )?;
    pipeline.set_filters(args.filters())?;

    // explicit peers replace the automatic selection unless --top is also given
    if args.peers.is_empty() || args.top.is_some() {
        pipeline.select_top(args.top.unwrap_or(config.default_top_n));
    }

    for &id in &args.peers {
        if pipeline.selection().contains(id) {
            continue;
        }

        warn_if_rejected(pipeline.toggle_peer(id)?, id, args.home);
    }

    let colors = args.data.colors();
    let mut out = host.output();
    write_ranking(&mut out, &pipeline, args.limit, colors)?;
    writeln!(out)?;
    write_selection(&mut out, &pipeline, colors)?;

    Ok(())
}
