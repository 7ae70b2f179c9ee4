use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::menu_analysis::entities::{MenuImage, UserProfile};

pub const DEFAULT_MIN_SUGGESTIONS: u32 = 3;
pub const DEFAULT_MAX_SUGGESTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AnalyzeMenuInput {
    pub profile: UserProfile,
    pub images: Vec<MenuImage>,
    pub suggestion_count: Option<u32>,
}

/// Which reply contract the model is held to.
///
/// `Basic` only asks for suggestions with the four core fields. `Rich` adds
/// the legibility gate, a category per dish and a nutrition estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    Basic,
    #[default]
    Rich,
}

impl SchemaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::Basic => "basic",
            SchemaVersion::Rich => "rich",
        }
    }

    pub fn requires_quality_check(&self) -> bool {
        matches!(self, SchemaVersion::Rich)
    }

    pub fn includes_nutrition(&self) -> bool {
        matches!(self, SchemaVersion::Rich)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(SchemaVersion::Basic),
            "rich" => Ok(SchemaVersion::Rich),
            other => Err(format!("unknown schema version: {other}")),
        }
    }
}

/// How many suggestions the model may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionBound {
    Range { min: u32, max: u32 },
    AtMost(u32),
}

impl SuggestionBound {
    pub fn max(&self) -> u32 {
        match self {
            SuggestionBound::Range { max, .. } => *max,
            SuggestionBound::AtMost(max) => *max,
        }
    }

    /// Phrase used in the instruction text.
    pub fn describe(&self) -> String {
        match self {
            SuggestionBound::Range { min, max } => format!("de {min} a {max}"),
            SuggestionBound::AtMost(max) => format!(
                "no máximo {max} (menos é permitido, nunca mais do que {max})"
            ),
        }
    }
}

impl From<Option<u32>> for SuggestionBound {
    fn from(count: Option<u32>) -> Self {
        match count {
            Some(count) => SuggestionBound::AtMost(count.max(1)),
            None => SuggestionBound::Range {
                min: DEFAULT_MIN_SUGGESTIONS,
                max: DEFAULT_MAX_SUGGESTIONS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_defaults_to_range() {
        let bound = SuggestionBound::from(None);
        assert_eq!(bound, SuggestionBound::Range { min: 3, max: 5 });
        assert_eq!(bound.max(), 5);
    }

    #[test]
    fn test_bound_clamps_zero_to_one() {
        assert_eq!(SuggestionBound::from(Some(0)), SuggestionBound::AtMost(1));
    }

    #[test]
    fn test_schema_version_parse() {
        assert_eq!("RICH".parse::<SchemaVersion>(), Ok(SchemaVersion::Rich));
        assert_eq!("basic".parse::<SchemaVersion>(), Ok(SchemaVersion::Basic));
        assert!("v3".parse::<SchemaVersion>().is_err());
    }
}
