use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    menu_analysis::{entities::MenuImage, ports::LLMClient},
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, empty when the model
    /// produced none.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn json_request(
    prompt: String,
    images: Vec<MenuImage>,
    response_schema: serde_json::Value,
) -> GeminiRequest {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::Text { text: prompt });
    parts.extend(images.into_iter().map(|image| Part::InlineData {
        inline_data: InlineData {
            mime_type: image.mime_type,
            data: image.data,
        },
    }));

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema,
        }),
    }
}

fn transport_error(e: reqwest::Error) -> CoreError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        CoreError::Network(e.to_string())
    } else {
        CoreError::ExternalServiceError(format!("LLM API error: {}", e))
    }
}

/// The provider's error body stays in the logs; callers only see the status.
fn status_error(status: StatusCode) -> CoreError {
    CoreError::ExternalServiceError(format!("LLM API returned error: {}", status))
}

impl GeminiLLMClient {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        if config.gemini_model.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "Gemini model name is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key: config.gemini_api_key,
            model_name: config.gemini_model,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                transport_error(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(status_error(status));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            if e.is_decode() {
                CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
            } else {
                transport_error(e)
            }
        })?;

        Ok(gemini_response.into_text())
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_images(
        &self,
        prompt: String,
        images: Vec<MenuImage>,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        tracing::info!(
            model = %self.model_name,
            images = images.len(),
            "Sending menu analysis request to Gemini"
        );

        self.call_gemini_api(json_request(prompt, images, response_schema))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::menu_analysis::entities::{MenuAnalysisError, MenuAnalysisErrorKind};

    #[test]
    fn test_new_rejects_blank_api_key() {
        let result = GeminiLLMClient::new(LLMConfig::new(""));
        assert!(matches!(result, Err(CoreError::MissingCredential(_))));
    }

    #[test]
    fn test_endpoint_uses_configured_model() {
        let mut config = LLMConfig::new("key");
        config.gemini_model = "gemini-test".to_string();
        config.gemini_base_url = "http://localhost:8080/v1beta/".to_string();

        let client = GeminiLLMClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_request_carries_text_then_images_in_one_turn() {
        let request = json_request(
            "instrução".to_string(),
            vec![
                MenuImage::new("AAAA", "image/png"),
                MenuImage::new("BBBB", "image/jpeg"),
            ],
            json!({ "type": "object" }),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "instrução");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[2]["inline_data"]["data"], "BBBB");
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
    }

    #[test]
    fn test_error_status_is_unclassified_without_provider_body() {
        let error = status_error(StatusCode::BAD_REQUEST);
        assert_eq!(
            error,
            CoreError::ExternalServiceError("LLM API returned error: 400 Bad Request".to_string())
        );

        let error = MenuAnalysisError::from(error);
        assert_eq!(error.kind(), MenuAnalysisErrorKind::Unclassified);
        assert!(error.to_string().ends_with("400 Bad Request"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let e = Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(transport_error(e), CoreError::Network(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_external_service_error() {
        let e = Client::new().get("not a url").send().await.unwrap_err();

        assert!(matches!(
            transport_error(e),
            CoreError::ExternalServiceError(_)
        ));
    }

    #[test]
    fn test_response_text_parts_are_concatenated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }
            }]
        }))
        .unwrap();

        assert_eq!(response.into_text(), "{\"a\":1}");
    }

    #[test]
    fn test_response_without_candidates_is_empty_text() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "OTHER" } }))
                .unwrap();

        assert_eq!(response.into_text(), "");
    }
}
