use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::menu_analysis::{
    entities::{AnalysisResult, MenuAnalysisError, QualityCheck, Suggestion},
    value_objects::{SchemaVersion, SuggestionBound},
};

/// Turns the model's raw text into suggestions, or the first failure found.
///
/// Checks run in order: empty text, JSON decoding, presence of the quality
/// check (when the schema requires one), legibility, then at least one
/// usable suggestion.
pub fn parse_menu_analysis(
    raw_response: &str,
    version: SchemaVersion,
    bound: SuggestionBound,
) -> Result<AnalysisResult, MenuAnalysisError> {
    if raw_response.trim().is_empty() {
        warn!("LLM returned an empty response");
        return Err(MenuAnalysisError::EmptyResponse);
    }

    let parsed: Value = serde_json::from_str(raw_response).map_err(|e| {
        error!(
            error = %e,
            raw_response = %raw_response,
            "Failed to parse LLM response"
        );
        MenuAnalysisError::MalformedResponse
    })?;

    let Some(reply) = parsed.as_object() else {
        error!(raw_response = %raw_response, "LLM response is not a JSON object");
        return Err(MenuAnalysisError::MalformedResponse);
    };

    let quality_check = match reply.get("qualityCheck") {
        Some(value) => Some(decode_quality_check(value)?),
        None if version.requires_quality_check() => {
            warn!("LLM response has no qualityCheck field");
            return Err(MenuAnalysisError::IncompleteResponse);
        }
        None => None,
    };

    if let Some(check) = quality_check
        && !check.is_legible
    {
        return Err(MenuAnalysisError::Illegible {
            feedback: check.feedback,
        });
    }

    let entries: &[Value] = match reply.get("suggestions") {
        Some(Value::Array(entries)) => entries.as_slice(),
        _ => &[],
    };

    let mut suggestions: Vec<Suggestion> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_suggestion(index, entry, version))
        .collect();

    if suggestions.is_empty() {
        return Err(MenuAnalysisError::NoMatches);
    }

    let max = bound.max() as usize;
    if suggestions.len() > max {
        warn!(
            returned = suggestions.len(),
            max, "LLM returned more suggestions than requested, truncating"
        );
        suggestions.truncate(max);
    }

    Ok(AnalysisResult { suggestions })
}

fn decode_quality_check(value: &Value) -> Result<QualityCheck, MenuAnalysisError> {
    serde_json::from_value::<QualityCheck>(value.clone()).map_err(|e| {
        warn!(error = %e, "Invalid qualityCheck format");
        MenuAnalysisError::IncompleteResponse
    })
}

fn decode_suggestion(index: usize, entry: &Value, version: SchemaVersion) -> Option<Suggestion> {
    let suggestion = match serde_json::from_value::<Suggestion>(entry.clone()) {
        Ok(suggestion) => suggestion,
        Err(e) => {
            warn!(index, error = %e, "Dropping suggestion with invalid format");
            return None;
        }
    };

    if !suggestion.is_complete() {
        warn!(index, "Dropping suggestion with blank required fields");
        return None;
    }

    if version.includes_nutrition() {
        match &suggestion.nutritional_info {
            None => warn!(
                index,
                dish_name = %suggestion.dish_name,
                "Suggestion has no nutritionalInfo block"
            ),
            Some(info) if info.unresolved_count() > 0 => debug!(
                index,
                dish_name = %suggestion.dish_name,
                unresolved = info.unresolved_count(),
                "Suggestion has unresolved nutrient values"
            ),
            Some(_) => {}
        }
    }

    Some(suggestion)
}
