#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This is an implementation detail of the peerbench tool. Do not take a dependency on this crate
//! as it may change in incompatible ways without warning.

// Core library for peerbench
//
// This library consolidates all functionality for the peerbench tool, which finds transit agencies
// similar to a chosen home agency and compares their performance over time.
//
// # Module Organization
//
// - [`commands`]: Command-line interface and orchestration
// - [`dataset`]: Loading the agency universe and yearly series
// - [`metrics`]: Similarity criteria and derived metrics
// - [`ranking`]: Filtering, normalization, similarity scoring and peer selection
// - [`comparison`]: Home vs. peer performance over time
// - [`config`]: User configuration
// - [`reports`]: Console rendering

pub type Result<T, E = anyhow::Error> = core::result::Result<T, E>;

macro_rules! declare_modules {
    ($($mod:ident),+ $(,)?) => {
        $(
            #[cfg(debug_assertions)]
            pub mod $mod;
            #[cfg(not(debug_assertions))]
            mod $mod;
        )+
    };
}

declare_modules!(commands, comparison, config, reports);

pub mod dataset;
pub mod metrics;
pub mod ranking;

pub use crate::commands::{Host, run};
