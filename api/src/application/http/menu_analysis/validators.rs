use menulens_core::domain::menu_analysis::entities::{MenuImage, UserProfile};
use utoipa::ToSchema;
use validator::Validate;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
pub const MAX_IMAGES: usize = 10;

/// Multipart form accepted by the analysis endpoint, documented for OpenAPI.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct AnalyzeMenuMultipart {
    /// JSON-encoded profile, see `UserProfile`.
    pub profile: Option<String>,
    pub suggestion_count: Option<u32>,
    /// One or more menu photos.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub image: Vec<Vec<u8>>,
}

#[derive(Debug, Validate)]
pub struct AnalyzeMenuValidator {
    pub profile: UserProfile,

    #[validate(range(
        min = 1,
        max = 10,
        message = "suggestion_count must be between 1 and 10"
    ))]
    pub suggestion_count: Option<u32>,

    #[validate(length(
        min = 1,
        max = 10,
        message = "between 1 and 10 menu images are required"
    ))]
    pub images: Vec<MenuImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(suggestion_count: Option<u32>, images: usize) -> AnalyzeMenuValidator {
        AnalyzeMenuValidator {
            profile: UserProfile::default(),
            suggestion_count,
            images: (0..images)
                .map(|_| MenuImage::new("aGk=", "image/jpeg"))
                .collect(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form(Some(3), 1).validate().is_ok());
        assert!(form(None, MAX_IMAGES).validate().is_ok());
    }

    #[test]
    fn test_images_are_required() {
        let errors = form(None, 0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("images"));
    }

    #[test]
    fn test_suggestion_count_out_of_range() {
        assert!(form(Some(0), 1).validate().is_err());
        assert!(form(Some(11), 1).validate().is_err());
    }
}
