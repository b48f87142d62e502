//! Database schema and types

use crate::prompt::DEFAULT_EMOJI_LEVEL;
use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS conversation_state (
    user_id TEXT PRIMARY KEY,
    last_response TEXT NOT NULL DEFAULT '',
    last_emoji_level INTEGER NOT NULL DEFAULT 50,
    active_room_id TEXT,
    updated_at TEXT NOT NULL
);
";

/// Per-user interaction state
///
/// One record per user, created on first use and overwritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Most recent sanitized AI response; empty until the first inference
    pub last_response: String,
    /// Emoji intensity (0-100) used for `last_response`
    pub last_emoji_level: u8,
    /// Room the current interaction flow belongs to
    pub active_room_id: Option<String>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            last_response: String::new(),
            last_emoji_level: DEFAULT_EMOJI_LEVEL,
            active_room_id: None,
        }
    }
}

impl ConversationState {
    pub fn has_response(&self) -> bool {
        !self.last_response.is_empty()
    }
}
