use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Platforms recognized by the gametools stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Pc,
    XboxOne,
    Ps4,
    XboxSeries,
    Ps5,
    Xbox,
    Psn,
}

pub const ALL_PLATFORMS: [Platform; 7] = [
    Platform::Pc,
    Platform::XboxOne,
    Platform::Ps4,
    Platform::XboxSeries,
    Platform::Ps5,
    Platform::Xbox,
    Platform::Psn,
];

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::XboxOne => "xboxone",
            Platform::Ps4 => "ps4",
            Platform::XboxSeries => "xboxseries",
            Platform::Ps5 => "ps5",
            Platform::Xbox => "xbox",
            Platform::Psn => "psn",
        }
    }

    pub fn expected_list() -> String {
        ALL_PLATFORMS
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        ALL_PLATFORMS
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| Error::InvalidPlatform {
                given: raw.to_string(),
                expected: Platform::expected_list(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{ALL_PLATFORMS, Platform};

    #[test]
    fn every_listed_platform_round_trips() {
        for platform in ALL_PLATFORMS {
            let parsed: Platform = platform.as_str().parse().expect("listed platform parses");
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("PC".parse::<Platform>().unwrap(), Platform::Pc);
        assert_eq!(" XboxSeries ".parse::<Platform>().unwrap(), Platform::XboxSeries);
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = "switch".parse::<Platform>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("switch"));
        assert!(msg.contains("xboxseries"));
    }
}
