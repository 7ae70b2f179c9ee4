use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Marker the model uses for a nutrient it could not resolve.
pub const UNRESOLVED_MARKER: &str = "N/A";

/// A nutrient estimate as answered by the model. The original text is kept
/// as-is so it round-trips unchanged, e.g. `"450 kcal"` or `"N/A"`.
/// Bare numbers are accepted and kept as their text; `null` or any other
/// shape is unresolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum NutrientValue {
    Quantity {
        raw: String,
        amount: f64,
        unit: Option<String>,
    },
    Unresolved(String),
}

impl NutrientValue {
    pub fn as_str(&self) -> &str {
        match self {
            NutrientValue::Quantity { raw, .. } => raw,
            NutrientValue::Unresolved(raw) => raw,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, NutrientValue::Unresolved(_))
    }

}

impl Default for NutrientValue {
    fn default() -> Self {
        NutrientValue::Unresolved(UNRESOLVED_MARKER.to_string())
    }
}

impl<'de> Deserialize<'de> for NutrientValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Value::deserialize(deserializer)? {
            Value::String(raw) => NutrientValue::from(raw),
            Value::Number(number) => NutrientValue::from(number.to_string()),
            _ => NutrientValue::default(),
        };

        Ok(value)
    }
}

/// Parses a leading number (comma or dot decimal) followed by an optional
/// unit. Anything else is unresolved.
fn parse_quantity(raw: &str) -> Option<(f64, Option<String>)> {
    let trimmed = raw.trim().trim_start_matches('~').trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ','))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (number, rest) = trimmed.split_at(end);
    let amount = number.replace(',', ".").parse::<f64>().ok()?;
    let unit = rest.trim();

    Some((amount, (!unit.is_empty()).then(|| unit.to_string())))
}

impl From<String> for NutrientValue {
    fn from(raw: String) -> Self {
        if raw.trim().eq_ignore_ascii_case(UNRESOLVED_MARKER) {
            return NutrientValue::Unresolved(raw);
        }

        match parse_quantity(&raw) {
            Some((amount, unit)) => NutrientValue::Quantity { raw, amount, unit },
            None => NutrientValue::Unresolved(raw),
        }
    }
}

impl From<&str> for NutrientValue {
    fn from(raw: &str) -> Self {
        NutrientValue::from(raw.to_string())
    }
}

impl From<NutrientValue> for String {
    fn from(value: NutrientValue) -> Self {
        match value {
            NutrientValue::Quantity { raw, .. } => raw,
            NutrientValue::Unresolved(raw) => raw,
        }
    }
}

/// Estimate for a 100g portion. Missing fields decode as unresolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionalInfo {
    #[schema(value_type = String, example = "450 kcal")]
    pub calories: NutrientValue,
    #[schema(value_type = String)]
    pub carbohydrates: NutrientValue,
    #[schema(value_type = String)]
    pub fats: NutrientValue,
    #[schema(value_type = String)]
    pub protein: NutrientValue,
    #[schema(value_type = String, example = "N/A")]
    pub sodium: NutrientValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub dish_name: String,
    pub description: String,
    /// As printed on the menu.
    pub price: String,
    pub reason_for_recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "nutrition_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// A nutrition block of the wrong shape is discarded, never the dish.
fn nutrition_or_none<'de, D>(deserializer: D) -> Result<Option<NutritionalInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value::<NutritionalInfo>(value) {
        Ok(info) => Ok(Some(info)),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding nutritionalInfo with invalid format");
            Ok(None)
        }
    }
}

impl NutritionalInfo {
    /// Number of fields the model could not resolve.
    pub fn unresolved_count(&self) -> usize {
        [
            &self.calories,
            &self.carbohydrates,
            &self.fats,
            &self.protein,
            &self.sodium,
        ]
        .iter()
        .filter(|value| value.is_unresolved())
        .count()
    }
}

impl Suggestion {
    /// A suggestion is usable when every core field carries text.
    pub fn is_complete(&self) -> bool {
        [
            &self.dish_name,
            &self.description,
            &self.price,
            &self.reason_for_recommendation,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrient_value_parses_quantity_with_unit() {
        let value = NutrientValue::from("450 kcal");
        assert_eq!(
            value,
            NutrientValue::Quantity {
                raw: "450 kcal".to_string(),
                amount: 450.0,
                unit: Some("kcal".to_string()),
            }
        );
        assert_eq!(value.as_str(), "450 kcal");
    }

    #[test]
    fn test_nutrient_value_accepts_comma_decimal() {
        let value = NutrientValue::from("12,5g");
        let NutrientValue::Quantity { amount, unit, .. } = value else {
            panic!("expected a quantity");
        };
        assert_eq!(amount, 12.5);
        assert_eq!(unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_nutrient_value_na_is_unresolved_and_kept() {
        let value = NutrientValue::from("N/A");
        assert!(value.is_unresolved());

        let serialized = serde_json::to_value(&value).unwrap();
        assert_eq!(serialized, serde_json::json!("N/A"));
    }

    #[test]
    fn test_nutrient_value_free_text_is_unresolved() {
        let value = NutrientValue::from("baixo");
        assert!(value.is_unresolved());
        assert_eq!(value.as_str(), "baixo");
    }

    #[test]
    fn test_numeric_nutrient_is_kept_as_text() {
        let value: NutrientValue = serde_json::from_value(serde_json::json!(450)).unwrap();
        assert_eq!(value.as_str(), "450");
        assert!(!value.is_unresolved());
    }

    #[test]
    fn test_partial_nutrition_block_fills_unresolved() {
        let info: NutritionalInfo = serde_json::from_value(serde_json::json!({
            "calories": "300 kcal",
            "carbohydrates": null,
            "fats": "10 g",
            "protein": 12
        }))
        .unwrap();

        assert_eq!(info.sodium.as_str(), UNRESOLVED_MARKER);
        assert_eq!(info.carbohydrates.as_str(), UNRESOLVED_MARKER);
        assert_eq!(info.protein.as_str(), "12");
        assert_eq!(info.unresolved_count(), 2);
    }

    #[test]
    fn test_wrong_shaped_nutrition_keeps_the_suggestion() {
        let suggestion: Suggestion = serde_json::from_value(serde_json::json!({
            "dishName": "Escondidinho",
            "description": "Carne seca com purê de mandioca",
            "price": "R$ 54,00",
            "reasonForRecommendation": "Sabores intensos, como você gosta",
            "nutritionalInfo": "indisponível"
        }))
        .unwrap();

        assert!(suggestion.is_complete());
        assert!(suggestion.nutritional_info.is_none());
    }

    #[test]
    fn test_suggestion_completeness() {
        let mut suggestion = Suggestion {
            dish_name: "Moqueca".to_string(),
            description: "Peixe com leite de coco".to_string(),
            price: "R$ 89,90".to_string(),
            reason_for_recommendation: "Combina com seu gosto por frutos do mar".to_string(),
            category: None,
            nutritional_info: None,
        };
        assert!(suggestion.is_complete());

        suggestion.price = " ".to_string();
        assert!(!suggestion.is_complete());
    }
}
