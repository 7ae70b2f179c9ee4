use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const ILLEGIBLE_FALLBACK_FEEDBACK: &str = "a imagem não está legível";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MenuAnalysisErrorKind {
    EmptyResponse,
    MalformedResponse,
    IncompleteResponse,
    Illegible,
    NoMatches,
    Connectivity,
    Unclassified,
    Unknown,
}

impl MenuAnalysisErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAnalysisErrorKind::EmptyResponse => "empty_response",
            MenuAnalysisErrorKind::MalformedResponse => "malformed_response",
            MenuAnalysisErrorKind::IncompleteResponse => "incomplete_response",
            MenuAnalysisErrorKind::Illegible => "illegible",
            MenuAnalysisErrorKind::NoMatches => "no_matches",
            MenuAnalysisErrorKind::Connectivity => "connectivity",
            MenuAnalysisErrorKind::Unclassified => "unclassified",
            MenuAnalysisErrorKind::Unknown => "unknown",
        }
    }
}

/// Failures of one analysis call. The display text is shown to the end
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuAnalysisError {
    #[error(
        "A IA não retornou nenhuma resposta. Isso costuma acontecer quando as imagens estão \
         escuras, desfocadas ou ilegíveis. Tente enviar fotos mais nítidas do cardápio."
    )]
    EmptyResponse,

    #[error(
        "A resposta da IA veio em um formato inesperado. Tente novamente com imagens mais \
         claras do cardápio."
    )]
    MalformedResponse,

    #[error(
        "Não foi possível concluir a verificação de qualidade do cardápio. Tente novamente."
    )]
    IncompleteResponse,

    #[error(
        "Não foi possível ler o cardápio: {}. Dica: tire uma nova foto com foco nítido, boa \
         iluminação e sem reflexos.",
        illegible_feedback(.feedback)
    )]
    Illegible { feedback: String },

    #[error(
        "Nenhuma sugestão foi encontrada. A IA pode não ter conseguido ler o cardápio, ou \
         nenhum prato corresponde ao seu perfil. Tente fotos mais nítidas ou ajuste suas \
         preferências."
    )]
    NoMatches,

    #[error(
        "Erro de conexão com o serviço de recomendações. Verifique sua conexão com a internet \
         e tente novamente."
    )]
    Connectivity,

    #[error("Falha ao obter recomendações: {0}")]
    Unclassified(String),

    #[error("Ocorreu um erro desconhecido ao obter recomendações. Tente novamente.")]
    Unknown,
}

fn illegible_feedback(feedback: &str) -> &str {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        ILLEGIBLE_FALLBACK_FEEDBACK
    } else {
        trimmed
    }
}

impl MenuAnalysisError {
    pub fn kind(&self) -> MenuAnalysisErrorKind {
        match self {
            MenuAnalysisError::EmptyResponse => MenuAnalysisErrorKind::EmptyResponse,
            MenuAnalysisError::MalformedResponse => MenuAnalysisErrorKind::MalformedResponse,
            MenuAnalysisError::IncompleteResponse => MenuAnalysisErrorKind::IncompleteResponse,
            MenuAnalysisError::Illegible { .. } => MenuAnalysisErrorKind::Illegible,
            MenuAnalysisError::NoMatches => MenuAnalysisErrorKind::NoMatches,
            MenuAnalysisError::Connectivity => MenuAnalysisErrorKind::Connectivity,
            MenuAnalysisError::Unclassified(_) => MenuAnalysisErrorKind::Unclassified,
            MenuAnalysisError::Unknown => MenuAnalysisErrorKind::Unknown,
        }
    }
}

fn looks_like_connectivity(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("network") || lowered.contains("fetch")
}

impl From<CoreError> for MenuAnalysisError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Network(_) => MenuAnalysisError::Connectivity,
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    MenuAnalysisError::Unknown
                } else if looks_like_connectivity(&message) {
                    MenuAnalysisError::Connectivity
                } else {
                    MenuAnalysisError::Unclassified(message)
                }
            }
        }
    }
}
