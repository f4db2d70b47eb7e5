//! Thinking mode selection echoed back to the calling agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much effort the agent should spend on its next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingMode {
    Quick,
    #[default]
    Normal,
    Deep,
    Ultra,
}

impl ThinkingMode {
    /// All modes in display order.
    pub const ALL: [ThinkingMode; 4] = [
        ThinkingMode::Quick,
        ThinkingMode::Normal,
        ThinkingMode::Deep,
        ThinkingMode::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingMode::Quick => "quick",
            ThinkingMode::Normal => "normal",
            ThinkingMode::Deep => "deep",
            ThinkingMode::Ultra => "ultra",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThinkingMode::Quick => "Quick",
            ThinkingMode::Normal => "Normal",
            ThinkingMode::Deep => "Deep Think",
            ThinkingMode::Ultra => "Ultra Think",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThinkingMode::Quick => "Fast response (less thorough)",
            ThinkingMode::Normal => "Standard thinking",
            ThinkingMode::Deep => "Extended analysis (slower)",
            ThinkingMode::Ultra => "Maximum depth (slowest)",
        }
    }

    /// Accent colour used by both front-ends.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ThinkingMode::Quick => (249, 226, 175),
            ThinkingMode::Normal => (137, 220, 235),
            ThinkingMode::Deep => (137, 180, 250),
            ThinkingMode::Ultra => (243, 139, 168),
        }
    }
}

impl fmt::Display for ThinkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four mode names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown thinking mode: {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for ThinkingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(ThinkingMode::Quick),
            "normal" => Ok(ThinkingMode::Normal),
            "deep" => Ok(ThinkingMode::Deep),
            "ultra" => Ok(ThinkingMode::Ultra),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_as_str() {
        for mode in ThinkingMode::ALL {
            assert_eq!(mode.as_str().parse::<ThinkingMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Deep".parse::<ThinkingMode>().is_err());
        assert!("".parse::<ThinkingMode>().is_err());
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(ThinkingMode::default(), ThinkingMode::Normal);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ThinkingMode::Ultra).unwrap();
        assert_eq!(json, "\"ultra\"");
        let mode: ThinkingMode = serde_json::from_str("\"quick\"").unwrap();
        assert_eq!(mode, ThinkingMode::Quick);
    }
}
