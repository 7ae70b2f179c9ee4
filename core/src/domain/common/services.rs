use std::sync::Arc;

use crate::domain::common::AnalysisConfig;

/// Application service. Holds the ports it drives; every call is
/// independent, nothing here is mutated after construction.
#[derive(Debug)]
pub struct Service<LLM> {
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) analysis: AnalysisConfig,
}

impl<LLM> Clone for Service<LLM> {
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            analysis: self.analysis.clone(),
        }
    }
}

impl<LLM> Service<LLM> {
    pub fn new(llm_client: LLM, analysis: AnalysisConfig) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            analysis,
        }
    }
}
