use serde::Deserialize;

/// Reporting-period facts recorded by the pipeline next to the data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Every reporting year that went into the dataset.
    pub years: Vec<u16>,

    /// The year the agency snapshot describes.
    pub latest_year: Option<u16>,
}
