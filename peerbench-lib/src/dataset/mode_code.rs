use core::convert::Infallible;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// NTD mode codes and their human-readable names.
const MODE_NAMES: &[(&str, &str)] = &[
    ("AR", "Alaska Railroad"),
    ("CB", "Commuter Bus"),
    ("CC", "Cable Car"),
    ("CR", "Commuter Rail"),
    ("DR", "Demand Response"),
    ("DT", "Demand Response Taxi"),
    ("FB", "Ferryboat"),
    ("HR", "Heavy Rail"),
    ("IP", "Inclined Plane"),
    ("JT", "Jitney"),
    ("LR", "Light Rail"),
    ("MB", "Bus"),
    ("MG", "Monorail/Automated Guideway"),
    ("PB", "Publico"),
    ("RB", "Bus Rapid Transit"),
    ("SR", "Streetcar Rail"),
    ("TB", "Trolleybus"),
    ("TR", "Aerial Tramway"),
    ("VP", "Vanpool"),
    ("YR", "Hybrid Rail"),
];

/// A transit mode code such as `MB` (bus) or `HR` (heavy rail).
///
/// Codes are stored trimmed and upper-cased so that `"mb"` and `"MB"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModeCode(String);

impl ModeCode {
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Human-readable name of the mode, or the code itself when it is not a known NTD mode.
    #[must_use]
    pub fn name(&self) -> &str {
        MODE_NAMES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        MODE_NAMES.iter().any(|(code, _)| *code == self.0)
    }
}

impl From<String> for ModeCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for ModeCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<ModeCode> for String {
    fn from(mode: ModeCode) -> Self {
        mode.0
    }
}

impl FromStr for ModeCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Display for ModeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_normalized() {
        assert_eq!(ModeCode::new(" mb "), ModeCode::new("MB"));
        assert_eq!(ModeCode::new("hr").code(), "HR");
    }

    #[test]
    fn test_known_mode_name() {
        assert_eq!(ModeCode::new("MB").name(), "Bus");
        assert_eq!(ModeCode::new("RB").name(), "Bus Rapid Transit");
        assert!(ModeCode::new("YR").is_known());
    }

    #[test]
    fn test_unknown_mode_falls_back_to_code() {
        let mode = ModeCode::new("ZZ");
        assert_eq!(mode.name(), "ZZ");
        assert!(!mode.is_known());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let mode: ModeCode = serde_json::from_str("\"lr\"").unwrap();
        assert_eq!(mode.code(), "LR");
    }
}
