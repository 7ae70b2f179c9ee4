use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::menu_analysis::entities::Suggestion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheck {
    pub is_legible: bool,
    #[serde(default)]
    pub feedback: String,
}

/// Suggestions in the order the model ranked them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub suggestions: Vec<Suggestion>,
}
