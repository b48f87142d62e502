//! Submitted form payloads

use crate::platform::User;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Which modal was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTag {
    Forward,
    Edit,
    Regenerate,
}

impl ViewTag {
    /// Accepts both the tag names and the ids of the modals that carry them.
    pub fn from_view_id(view_id: &str) -> Option<Self> {
        match view_id {
            "forward" | "frwd-modal" => Some(Self::Forward),
            "edit" | "edit-modal" => Some(Self::Edit),
            "regenerate" | "redo-modal" => Some(Self::Regenerate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Edit => "edit",
            Self::Regenerate => "regenerate",
        }
    }
}

impl fmt::Display for ViewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a form value: block id, then action id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAddress {
    pub block: &'static str,
    pub action: &'static str,
}

impl FieldAddress {
    /// Target room name on the forward modal
    pub const ROOM: Self = Self {
        block: "room-block",
        action: "room",
    };
    /// Editor text on the edit modal
    pub const EDITOR: Self = Self {
        block: "edit-block",
        action: "editor",
    };
    /// Emoji dial on the regenerate modal
    pub const EMOJI_LEVEL: Self = Self {
        block: "emoji-block",
        action: "emojify",
    };
    /// Free-text instruction on the regenerate modal
    pub const INSTRUCTIONS: Self = Self {
        block: "instruct-block",
        action: "instructions",
    };
}

/// A submitted modal
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSubmission {
    pub view_id: String,
    pub user: User,
    /// Form values keyed by block id, then action id
    #[serde(default)]
    pub state: HashMap<String, HashMap<String, Value>>,
}

impl ViewSubmission {
    pub fn tag(&self) -> Option<ViewTag> {
        ViewTag::from_view_id(&self.view_id)
    }

    /// Read a form value as text. Numbers and booleans are rendered; nulls
    /// and missing fields are `None`.
    pub fn field(&self, address: FieldAddress) -> Option<String> {
        match self.state.get(address.block)?.get(address.action)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_tags() {
        assert_eq!(ViewTag::from_view_id("forward"), Some(ViewTag::Forward));
        assert_eq!(ViewTag::from_view_id("frwd-modal"), Some(ViewTag::Forward));
        assert_eq!(ViewTag::from_view_id("edit-modal"), Some(ViewTag::Edit));
        assert_eq!(ViewTag::from_view_id("redo-modal"), Some(ViewTag::Regenerate));
        assert_eq!(ViewTag::from_view_id("regenerate"), Some(ViewTag::Regenerate));
        assert_eq!(ViewTag::from_view_id("settings-modal"), None);
    }

    #[test]
    fn test_deserialize_and_read_fields() {
        let submission: ViewSubmission = serde_json::from_value(json!({
            "view_id": "redo-modal",
            "user": { "id": "u1", "username": "alice" },
            "state": {
                "emoji-block": { "emojify": 75 },
                "instruct-block": { "instructions": "shorter please" },
                "room-block": { "room": null }
            }
        }))
        .unwrap();

        assert_eq!(submission.tag(), Some(ViewTag::Regenerate));
        assert_eq!(submission.field(FieldAddress::EMOJI_LEVEL).as_deref(), Some("75"));
        assert_eq!(
            submission.field(FieldAddress::INSTRUCTIONS).as_deref(),
            Some("shorter please")
        );
        assert_eq!(submission.field(FieldAddress::ROOM), None);
        assert_eq!(submission.field(FieldAddress::EDITOR), None);
    }

    #[test]
    fn test_state_is_optional() {
        let submission: ViewSubmission = serde_json::from_value(json!({
            "view_id": "edit-modal",
            "user": { "id": "u1", "username": "alice" }
        }))
        .unwrap();
        assert!(submission.state.is_empty());
    }
}
