//! Chat platform adapter over its REST API
//!
//! Speaks the Rocket.Chat-style `/api/v1` routes: `rooms.info` for lookups
//! and `chat.postMessage` for everything that is posted. The API has no
//! ephemeral-message route, so notifications and generation summaries go to
//! the user's direct channel (`@username`).

use super::{InitiatorSummary, Messenger, NotificationIcon, Notifier, Room, RoomDirectory, User};
use crate::config::HostConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BOT_ALIAS: &str = "Embellisher";

/// REST client for the host chat platform
pub struct RestPlatform {
    client: Client,
    config: HostConfig,
}

impl RestPlatform {
    pub fn new(config: HostConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/api/v1/{route}", self.config.base_url)
    }

    async fn room_info(&self, query: (&str, &str)) -> Result<Option<Room>, String> {
        let response = self
            .client
            .get(self.url("rooms.info"))
            .header("X-User-Id", &self.config.user_id)
            .header("X-Auth-Token", &self.config.token)
            .query(&[query])
            .send()
            .await
            .map_err(|e| format!("rooms.info request failed: {e}"))?;

        if !response.status().is_success() {
            // The API answers 400 for unknown rooms
            tracing::debug!(status = %response.status(), key = query.0, value = query.1, "Room not found");
            return Ok(None);
        }

        let info: RoomInfoResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse rooms.info response: {e}"))?;

        Ok(info.into_room())
    }

    async fn post_message(&self, message: &PostMessage<'_>) -> Result<(), String> {
        let response = self
            .client
            .post(self.url("chat.postMessage"))
            .header("X-User-Id", &self.config.user_id)
            .header("X-Auth-Token", &self.config.token)
            .json(message)
            .send()
            .await
            .map_err(|e| format!("chat.postMessage request failed: {e}"))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(format!("chat.postMessage returned HTTP {status}: {body}"))
        }
    }
}

#[async_trait]
impl RoomDirectory for RestPlatform {
    async fn room_by_id(&self, room_id: &str) -> Result<Option<Room>, String> {
        self.room_info(("roomId", room_id)).await
    }

    async fn room_by_name(&self, name: &str) -> Result<Option<Room>, String> {
        let name = name.trim().trim_start_matches('#');
        if name.is_empty() {
            return Ok(None);
        }
        self.room_info(("roomName", name)).await
    }
}

#[async_trait]
impl Messenger for RestPlatform {
    async fn send(&self, text: &str, as_user: &User, room: &Room) -> Result<(), String> {
        self.post_message(&PostMessage::to_room(text, as_user, room)).await
    }

    async fn post_initiator(
        &self,
        user: &User,
        room: &Room,
        summary: &InitiatorSummary,
    ) -> Result<(), String> {
        self.post_message(&PostMessage::initiator(user, room, summary)).await
    }
}

#[async_trait]
impl Notifier for RestPlatform {
    async fn notify(
        &self,
        user: &User,
        room: &Room,
        text: &str,
        icon: Option<NotificationIcon>,
    ) -> Result<(), String> {
        self.post_message(&PostMessage::notification(user, room, text, icon)).await
    }
}

// REST API types

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PostMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    room_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    text: &'a str,
    alias: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Attachment<'a> {
    title: &'a str,
    text: &'a str,
}

impl<'a> PostMessage<'a> {
    fn to_room(text: &'a str, as_user: &'a User, room: &'a Room) -> Self {
        Self {
            room_id: Some(&room.id),
            channel: None,
            text,
            alias: &as_user.username,
            emoji: None,
            attachments: Vec::new(),
        }
    }

    fn notification(
        user: &'a User,
        room: &'a Room,
        text: &'a str,
        icon: Option<NotificationIcon>,
    ) -> Self {
        Self {
            room_id: None,
            channel: Some(format!("@{}", user.username)),
            text,
            alias: BOT_ALIAS,
            emoji: icon.map(NotificationIcon::emoji),
            attachments: vec![Attachment {
                title: "Room",
                text: &room.name,
            }],
        }
    }

    fn initiator(user: &'a User, room: &'a Room, summary: &'a InitiatorSummary) -> Self {
        Self {
            room_id: None,
            channel: Some(format!("@{}", user.username)),
            text: &room.name,
            alias: BOT_ALIAS,
            emoji: None,
            attachments: vec![
                Attachment {
                    title: "Your input",
                    text: &summary.user_text,
                },
                Attachment {
                    title: "AI response",
                    text: &summary.response,
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoomInfoResponse {
    #[serde(default)]
    room: Option<RoomInfo>,
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct RoomInfo {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fname: Option<String>,
}

impl RoomInfoResponse {
    fn into_room(self) -> Option<Room> {
        if !self.success {
            return None;
        }
        self.room.map(|r| Room {
            name: r.name.or(r.fname).unwrap_or_else(|| r.id.clone()),
            id: r.id,
        })
    }
}
