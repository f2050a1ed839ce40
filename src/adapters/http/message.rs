//! Bodies shared by several endpoints.

use serde::Serialize;

/// `{"message": ...}` for mutations that return no entity.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
