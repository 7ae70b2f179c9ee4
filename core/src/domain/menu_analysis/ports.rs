use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu_analysis::{
        entities::{AnalysisResult, MenuAnalysisError, MenuImage},
        value_objects::AnalyzeMenuInput,
    },
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends the instruction and every image as parts of a single turn and
    /// returns the model's raw text. An empty string means the model
    /// answered with no text at all.
    fn generate_with_images(
        &self,
        prompt: String,
        images: Vec<MenuImage>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for menu analysis business logic
pub trait MenuAnalysisService: Send + Sync {
    fn analyze_menu(
        &self,
        input: AnalyzeMenuInput,
    ) -> impl Future<Output = Result<AnalysisResult, MenuAnalysisError>> + Send;
}
