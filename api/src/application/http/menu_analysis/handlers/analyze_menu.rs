use axum::extract::{Multipart, State};
use base64::{Engine as _, engine::general_purpose};
use menulens_core::domain::menu_analysis::{
    entities::{AnalysisResult, MenuImage, UserProfile},
    ports::MenuAnalysisService,
    value_objects::AnalyzeMenuInput,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::{
    menu_analysis::validators::{
        AnalyzeMenuMultipart, AnalyzeMenuValidator, MAX_IMAGE_SIZE, MAX_IMAGES,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMenuResponse {
    pub data: AnalysisResult,
}

/// Reads the multipart body into a validated form.
async fn read_form(mut multipart: Multipart) -> Result<AnalyzeMenuValidator, ApiError> {
    let mut profile = UserProfile::default();
    let mut suggestion_count: Option<u32> = None;
    let mut images: Vec<MenuImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "profile" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read profile: {}", e)))?;

                if !value.trim().is_empty() {
                    profile = serde_json::from_str(&value).map_err(|e| {
                        ApiError::BadRequest(format!("Invalid profile format: {}", e))
                    })?;
                }
            }
            "suggestion_count" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read suggestion_count: {}", e))
                })?;

                if !value.trim().is_empty() {
                    suggestion_count = Some(value.trim().parse().map_err(|_| {
                        ApiError::BadRequest("Invalid suggestion_count format".to_string())
                    })?);
                }
            }
            "image" => {
                if images.len() >= MAX_IMAGES {
                    return Err(ApiError::BadRequest(format!(
                        "Too many images. Max is {}",
                        MAX_IMAGES
                    )));
                }

                let mime_type = field
                    .content_type()
                    .map(|content_type| content_type.to_string())
                    .filter(|content_type| content_type.starts_with("image/"))
                    .ok_or_else(|| {
                        ApiError::BadRequest(
                            "Image field must have an image/* content type".to_string(),
                        )
                    })?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.is_empty() {
                    warn!(mime_type = %mime_type, "Empty image upload attempted");
                    return Err(ApiError::BadRequest("Image is empty".to_string()));
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                images.push(MenuImage::new(
                    general_purpose::STANDARD.encode(&data),
                    mime_type,
                ));
            }
            _ => {}
        }
    }

    let form = AnalyzeMenuValidator {
        profile,
        suggestion_count,
        images,
    };
    form.validate()?;

    Ok(form)
}

#[utoipa::path(
    post,
    path = "",
    tag = "menu-analysis",
    summary = "Recommend dishes from menu photos",
    description = "Reads the menu photos with the LLM and returns dishes matching the profile, with an estimated nutritional breakdown.",
    request_body(content = AnalyzeMenuMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeMenuResponse),
        (status = 400, description = "Invalid form", body = ApiErrorResponse),
        (status = 422, description = "Menu unreadable or no matching dish", body = ApiErrorResponse),
        (status = 502, description = "LLM service failure", body = ApiErrorResponse),
        (status = 503, description = "LLM service unreachable", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_menu(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<AnalyzeMenuResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let result = state
        .service
        .analyze_menu(AnalyzeMenuInput {
            profile: form.profile,
            images: form.images,
            suggestion_count: form.suggestion_count,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeMenuResponse { data: result }))
}
