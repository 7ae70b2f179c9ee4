use serde_json::json;

use crate::domain::menu_analysis::value_objects::SchemaVersion;

fn string_field() -> serde_json::Value {
    json!({ "type": "string" })
}

fn nutritional_info_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "description": "Estimativa para uma porção de 100g",
        "properties": {
            "calories": string_field(),
            "carbohydrates": string_field(),
            "fats": string_field(),
            "protein": string_field(),
            "sodium": string_field()
        },
        "required": ["calories", "carbohydrates", "fats", "protein", "sodium"]
    })
}

fn suggestion_schema(version: SchemaVersion) -> serde_json::Value {
    let mut properties = json!({
        "dishName": string_field(),
        "description": string_field(),
        "price": string_field(),
        "reasonForRecommendation": string_field()
    });
    let mut required = vec![
        "dishName",
        "description",
        "price",
        "reasonForRecommendation",
    ];

    if version == SchemaVersion::Rich {
        properties["category"] = string_field();
        properties["nutritionalInfo"] = nutritional_info_schema();
        required.extend(["category", "nutritionalInfo"]);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Returns the JSON schema for menu analysis LLM responses
pub fn get_menu_analysis_schema(version: SchemaVersion) -> serde_json::Value {
    let suggestions = json!({
        "type": "array",
        "items": suggestion_schema(version)
    });

    match version {
        SchemaVersion::Basic => json!({
            "type": "object",
            "properties": { "suggestions": suggestions },
            "required": ["suggestions"]
        }),
        SchemaVersion::Rich => json!({
            "type": "object",
            "properties": {
                "qualityCheck": {
                    "type": "object",
                    "properties": {
                        "isLegible": { "type": "boolean" },
                        "feedback": string_field()
                    },
                    "required": ["isLegible", "feedback"]
                },
                "suggestions": suggestions
            },
            "required": ["qualityCheck", "suggestions"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_schema_requires_quality_check_and_nutrition() {
        let schema = get_menu_analysis_schema(SchemaVersion::Rich);

        assert_eq!(schema["required"], json!(["qualityCheck", "suggestions"]));
        let item = &schema["properties"]["suggestions"]["items"];
        let required = item["required"].as_array().unwrap();
        assert!(required.contains(&json!("category")));
        assert!(required.contains(&json!("nutritionalInfo")));
        assert_eq!(
            item["properties"]["nutritionalInfo"]["required"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[test]
    fn test_basic_schema_omits_rich_fields() {
        let schema = get_menu_analysis_schema(SchemaVersion::Basic);

        assert!(schema["properties"].get("qualityCheck").is_none());
        let item = &schema["properties"]["suggestions"]["items"];
        assert!(item["properties"].get("category").is_none());
        assert!(item["properties"].get("nutritionalInfo").is_none());
        assert_eq!(item["required"].as_array().unwrap().len(), 4);
    }
}
