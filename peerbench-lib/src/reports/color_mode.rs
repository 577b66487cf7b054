//! Color mode configuration for reports.

use clap::ValueEnum;
use std::io::{IsTerminal, stdout};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Always,
    Never,
    #[default]
    Auto,
}

impl ColorMode {
    /// Whether output should carry ANSI styling. `Auto` colors only a terminal that has not opted out via `NO_COLOR`.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
    }

    #[test]
    fn test_parse() {
        assert_eq!(ColorMode::from_str("never", true).unwrap(), ColorMode::Never);
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }
}
