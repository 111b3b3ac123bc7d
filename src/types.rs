//! Type-safe selection types for QuickLook
//!
//! Stringly-typed values that have a small closed set of options are modeled
//! as enums here, so the cascade can match on them exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Processor architecture used to scope the family and size lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Architecture {
    #[default]
    #[strum(serialize = "x86_64")]
    #[serde(rename = "x86_64")]
    X86_64,
    #[strum(serialize = "arm64")]
    #[serde(rename = "arm64")]
    Arm64,
}

impl Architecture {
    /// Wire value sent as the `arch` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }

    /// Families preferred as the initial selection, in priority order
    pub fn preferred_families(&self) -> &'static [&'static str] {
        match self {
            Self::X86_64 => &["m6i", "m7i", "m5"],
            Self::Arm64 => &["m7g", "m8g"],
        }
    }

    /// Cycle to the other architecture
    pub fn toggled(&self) -> Self {
        match self {
            Self::X86_64 => Self::Arm64,
            Self::Arm64 => Self::X86_64,
        }
    }
}

/// Resolution state of a dependent option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Validity {
    /// Nothing requested yet (upstream field empty)
    #[default]
    Unresolved,
    /// A fetch is in flight
    Loading,
    /// Options are available
    Ready,
    /// Well-formed response with no options
    Empty,
    /// The fetch failed; re-triggering the selection retries it
    Error,
}

impl Validity {
    /// Whether this state should block the primary action
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Form fields, in the order they are laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumIter)]
pub enum FocusField {
    #[default]
    Region,
    Architecture,
    Category,
    Family,
    #[strum(serialize = "Instance Type")]
    Size,
    Operation,
    #[strum(serialize = "Volume Type")]
    VolumeType,
    #[strum(serialize = "Volume Size")]
    VolumeSize,
}

impl FocusField {
    /// All fields in display order
    pub const ALL: [FocusField; 8] = [
        Self::Region,
        Self::Architecture,
        Self::Category,
        Self::Family,
        Self::Size,
        Self::Operation,
        Self::VolumeType,
        Self::VolumeSize,
    ];

    /// Next field down, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field up, wrapping around
    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn architecture_parses_wire_values() {
        assert_eq!(Architecture::from_str("arm64").unwrap(), Architecture::Arm64);
        assert_eq!(Architecture::from_str("x86_64").unwrap(), Architecture::X86_64);
        assert!(Architecture::from_str("sparc").is_err());
    }

    #[test]
    fn architecture_serde_uses_wire_values() {
        let json = serde_json::to_string(&Architecture::Arm64).unwrap();
        assert_eq!(json, "\"arm64\"");
        let parsed: Architecture = serde_json::from_str("\"x86_64\"").unwrap();
        assert_eq!(parsed, Architecture::X86_64);
    }

    #[test]
    fn preferred_families_per_architecture() {
        assert_eq!(Architecture::Arm64.preferred_families(), &["m7g", "m8g"]);
        assert_eq!(Architecture::X86_64.preferred_families()[0], "m6i");
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(FocusField::VolumeSize.next(), FocusField::Region);
        assert_eq!(FocusField::Region.previous(), FocusField::VolumeSize);
        assert_eq!(FocusField::Family.next(), FocusField::Size);
    }

    #[test]
    fn validity_display_is_lowercase() {
        assert_eq!(Validity::Empty.to_string(), "empty");
        assert!(Validity::Error.is_error());
        assert!(!Validity::Empty.is_error());
    }
}
