//! Chat platform collaborators
//!
//! The dispatcher only talks to the host chat platform and to storage through
//! the traits in [`traits`]; [`rest`] implements them against the platform's
//! REST API.

pub mod rest;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use rest::RestPlatform;
pub use traits::*;

use serde::{Deserialize, Serialize};

/// Platform user, referenced but not owned by this service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Message destination resolved through the room directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
}

/// Icon shown next to a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    Warning,
    Success,
}

impl NotificationIcon {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Warning => ":warning:",
            Self::Success => ":white_check_mark:",
        }
    }
}

/// Summary posted after a successful generation: what the user asked for and
/// what the model produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatorSummary {
    pub user_text: String,
    pub response: String,
}
