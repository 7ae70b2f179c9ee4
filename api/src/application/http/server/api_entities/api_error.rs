use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menulens_core::domain::menu_analysis::entities::{MenuAnalysisError, MenuAnalysisErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    MenuAnalysis(#[from] MenuAnalysisError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MenuAnalysis(error) => match error.kind() {
                MenuAnalysisErrorKind::EmptyResponse
                | MenuAnalysisErrorKind::MalformedResponse
                | MenuAnalysisErrorKind::IncompleteResponse
                | MenuAnalysisErrorKind::Illegible
                | MenuAnalysisErrorKind::NoMatches => StatusCode::UNPROCESSABLE_ENTITY,
                MenuAnalysisErrorKind::Connectivity => StatusCode::SERVICE_UNAVAILABLE,
                MenuAnalysisErrorKind::Unclassified | MenuAnalysisErrorKind::Unknown => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::MenuAnalysis(error) => error.kind().as_str(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect::<Vec<_>>()
            .join(", ");

        ApiError::BadRequest(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ApiErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_failures_are_unprocessable() {
        let error = ApiError::from(MenuAnalysisError::Illegible {
            feedback: "Foto tremida".to_string(),
        });

        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.code(), "illegible");
        assert!(error.to_string().contains("Foto tremida"));
    }

    #[test]
    fn test_connectivity_is_service_unavailable() {
        let error = ApiError::from(MenuAnalysisError::Connectivity);
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unclassified_is_bad_gateway() {
        let error = ApiError::from(MenuAnalysisError::Unclassified("boom".to_string()));
        assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.code(), "unclassified");
    }
}
