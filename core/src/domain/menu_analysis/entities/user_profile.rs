use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_UNSPECIFIED: &str = "Não especificado";
pub const DEFAULT_MOOD: &str = "Neutro";
pub const DEFAULT_BUDGET: &str = "Flexível";

/// A profile attribute. Older front-ends send free text, newer ones send
/// tag lists; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProfileField {
    Text(String),
    Tags(Vec<String>),
}

impl ProfileField {
    /// Renders the field for the prompt, `None` when nothing usable is set.
    pub fn render(&self) -> Option<String> {
        let rendered = match self {
            ProfileField::Text(text) => text.trim().to_string(),
            ProfileField::Tags(tags) => tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };

        (!rendered.is_empty()).then_some(rendered)
    }
}

impl From<&str> for ProfileField {
    fn from(value: &str) -> Self {
        ProfileField::Text(value.to_string())
    }
}

impl From<Vec<&str>> for ProfileField {
    fn from(value: Vec<&str>) -> Self {
        ProfileField::Tags(value.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub taste_preferences: Option<ProfileField>,
    pub allergies: Option<ProfileField>,
    pub dietary_preferences: Option<ProfileField>,
    pub current_mood: Option<ProfileField>,
    pub dietary_restrictions: Option<ProfileField>,
    pub budget: Option<ProfileField>,
}

fn render_or(field: &Option<ProfileField>, fallback: &str) -> String {
    field
        .as_ref()
        .and_then(ProfileField::render)
        .unwrap_or_else(|| fallback.to_string())
}

impl UserProfile {
    /// The six prompt lines, in their fixed order, with defaults applied.
    pub fn prompt_lines(&self) -> [(&'static str, String); 6] {
        [
            (
                "Preferências de sabor",
                render_or(&self.taste_preferences, DEFAULT_UNSPECIFIED),
            ),
            ("Alergias", render_or(&self.allergies, DEFAULT_UNSPECIFIED)),
            (
                "Preferências alimentares",
                render_or(&self.dietary_preferences, DEFAULT_UNSPECIFIED),
            ),
            ("Humor atual", render_or(&self.current_mood, DEFAULT_MOOD)),
            (
                "Restrições alimentares",
                render_or(&self.dietary_restrictions, DEFAULT_UNSPECIFIED),
            ),
            ("Orçamento", render_or(&self.budget, DEFAULT_BUDGET)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_uses_defaults() {
        let lines = UserProfile::default().prompt_lines();
        let values: Vec<&str> = lines.iter().map(|(_, v)| v.as_str()).collect();

        assert_eq!(
            values,
            vec![
                DEFAULT_UNSPECIFIED,
                DEFAULT_UNSPECIFIED,
                DEFAULT_UNSPECIFIED,
                DEFAULT_MOOD,
                DEFAULT_UNSPECIFIED,
                DEFAULT_BUDGET,
            ]
        );
    }

    #[test]
    fn test_blank_text_and_empty_tags_fall_back() {
        let profile = UserProfile {
            taste_preferences: Some("   ".into()),
            allergies: Some(ProfileField::Tags(vec![])),
            current_mood: Some(vec!["", " "].into()),
            ..Default::default()
        };
        let lines = profile.prompt_lines();

        assert_eq!(lines[0].1, DEFAULT_UNSPECIFIED);
        assert_eq!(lines[1].1, DEFAULT_UNSPECIFIED);
        assert_eq!(lines[3].1, DEFAULT_MOOD);
    }

    #[test]
    fn test_both_profile_shapes_deserialize() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "tastePreferences": "picante",
            "allergies": ["amendoim", "camarão"],
            "budget": null
        }))
        .unwrap();

        let lines = profile.prompt_lines();
        assert_eq!(lines[0].1, "picante");
        assert_eq!(lines[1].1, "amendoim, camarão");
        assert_eq!(lines[5].1, DEFAULT_BUDGET);
    }
}
