//! API request and response types

use crate::platform::User;
use serde::{Deserialize, Serialize};

/// Request to start an interaction flow from an in-progress message
#[derive(Debug, Deserialize)]
pub struct EmbellishRequest {
    pub user: User,
    pub room_id: String,
    pub text: String,
}

/// Generated text, absent when the user was notified instead
#[derive(Debug, Serialize)]
pub struct EmbellishResponse {
    pub text: Option<String>,
}

/// Acknowledgment of a submitted form
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
