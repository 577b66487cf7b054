use core::fmt::{Display, Formatter, Result as FmtResult};
use core::num::ParseIntError;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Opaque key identifying an agency, stable across reporting years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgencyId(u32);

impl AgencyId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for AgencyId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for AgencyId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Display for AgencyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:05}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_five_digits() {
        assert_eq!(AgencyId::new(1).to_string(), "00001");
        assert_eq!(AgencyId::new(90154).to_string(), "90154");
    }

    #[test]
    fn test_from_str_accepts_leading_zeros() {
        let id: AgencyId = " 00042 ".parse().unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_from_str_rejects_text() {
        let _ = "metro".parse::<AgencyId>().unwrap_err();
    }
}
