use tracing::{info, instrument, warn};

use crate::domain::{
    common::services::Service,
    menu_analysis::{
        entities::{AnalysisResult, MenuAnalysisError},
        ports::{LLMClient, MenuAnalysisService},
        prompt::build_menu_prompt,
        schema::get_menu_analysis_schema,
        validation::parse_menu_analysis,
        value_objects::{AnalyzeMenuInput, SuggestionBound},
    },
};

impl<LLM> MenuAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(
        skip(self, input),
        fields(
            images = input.images.len(),
            suggestion_count = ?input.suggestion_count,
            schema_version = %self.analysis.schema_version
        )
    )]
    async fn analyze_menu(
        &self,
        input: AnalyzeMenuInput,
    ) -> Result<AnalysisResult, MenuAnalysisError> {
        let version = self.analysis.schema_version;
        let bound = SuggestionBound::from(input.suggestion_count);

        if input.images.iter().all(|image| image.is_empty()) {
            warn!("No usable image content supplied for menu analysis");
        }

        // 1. Build prompt and response schema
        let prompt = build_menu_prompt(&input.profile, version, bound);
        let response_schema = get_menu_analysis_schema(version);

        // 2. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_images(prompt, input.images, response_schema)
            .await
            .map_err(|e| {
                warn!(error = %e, "Menu analysis request failed");
                MenuAnalysisError::from(e)
            })?;

        // 3. Parse and validate response
        let result = parse_menu_analysis(&raw_response, version, bound)?;

        info!(
            suggestions = result.suggestions.len(),
            "Menu analysis completed"
        );

        Ok(result)
    }
}
