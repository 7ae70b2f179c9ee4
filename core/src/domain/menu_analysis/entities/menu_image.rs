use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One menu photo, already base64-encoded, with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuImage {
    pub data: String,
    pub mime_type: String,
}

impl MenuImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}
