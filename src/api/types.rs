use serde::{Deserialize, Serialize};

/// Uniform soft-failure body, also used for affirmative notices such as
/// logout. Expected error paths return this instead of raising.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
