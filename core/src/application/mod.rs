use crate::{
    domain::common::{MenuLensConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type MenuLensService = Service<GeminiLLMClient>;

/// Builds the service from configuration. Fails immediately when the
/// Gemini credential is absent instead of on the first analysis.
pub async fn create_service(config: MenuLensConfig) -> Result<MenuLensService, CoreError> {
    let llm_client = GeminiLLMClient::new(config.llm)?;

    tracing::info!(
        schema_version = %config.analysis.schema_version,
        "menu analysis service initialized"
    );

    Ok(Service::new(llm_client, config.analysis))
}
