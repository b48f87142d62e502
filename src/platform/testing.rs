//! Mock implementations for testing
//!
//! These mocks enable dispatcher and inference tests without real I/O.

use super::traits::*;
use super::{InitiatorSummary, NotificationIcon, Room, User};
use crate::db::ConversationState;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// Mock LLM Client
// ============================================================================

/// Mock LLM client that returns queued responses
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response with the given raw content
    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LlmResponse::text(text)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// In-Memory State Store
// ============================================================================

/// In-memory state store for testing
#[derive(Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<String, ConversationState>>,
    /// Number of `set` calls, to assert that failure paths write nothing
    pub writes: Mutex<usize>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's state without counting it as a write
    pub fn with_state(self, user_id: &str, state: ConversationState) -> Self {
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state);
        self
    }

    pub fn current(&self, user_id: &str) -> Option<ConversationState> {
        self.states.lock().unwrap().get(user_id).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>, String> {
        Ok(self.current(user_id))
    }

    async fn set(&self, user_id: &str, state: &ConversationState) -> Result<(), String> {
        *self.writes.lock().unwrap() += 1;
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}

// ============================================================================
// Mock Platform
// ============================================================================

/// A message posted into a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub text: String,
    pub user_id: String,
    pub room_id: String,
}

/// A notification shown to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub user_id: String,
    pub room_id: String,
    pub text: String,
    pub icon: Option<NotificationIcon>,
}

/// Mock platform with a fixed room directory that records all output
#[derive(Default)]
pub struct MockPlatform {
    rooms: Vec<Room>,
    pub messages: Mutex<Vec<SentMessage>>,
    pub notifications: Mutex<Vec<SentNotification>>,
    pub initiators: Mutex<Vec<InitiatorSummary>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(mut self, id: &str, name: &str) -> Self {
        self.rooms.push(Room {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn sent_notifications(&self) -> Vec<SentNotification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn posted_initiators(&self) -> Vec<InitiatorSummary> {
        self.initiators.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomDirectory for MockPlatform {
    async fn room_by_id(&self, room_id: &str) -> Result<Option<Room>, String> {
        Ok(self.rooms.iter().find(|r| r.id == room_id).cloned())
    }

    async fn room_by_name(&self, name: &str) -> Result<Option<Room>, String> {
        Ok(self.rooms.iter().find(|r| r.name == name).cloned())
    }
}

#[async_trait]
impl Messenger for MockPlatform {
    async fn send(&self, text: &str, as_user: &User, room: &Room) -> Result<(), String> {
        self.messages.lock().unwrap().push(SentMessage {
            text: text.to_string(),
            user_id: as_user.id.clone(),
            room_id: room.id.clone(),
        });
        Ok(())
    }

    async fn post_initiator(
        &self,
        _user: &User,
        _room: &Room,
        summary: &InitiatorSummary,
    ) -> Result<(), String> {
        self.initiators.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

#[async_trait]
impl Notifier for MockPlatform {
    async fn notify(
        &self,
        user: &User,
        room: &Room,
        text: &str,
        icon: Option<NotificationIcon>,
    ) -> Result<(), String> {
        self.notifications.lock().unwrap().push(SentNotification {
            user_id: user.id.clone(),
            room_id: room.id.clone(),
            text: text.to_string(),
            icon,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_llm_client() {
        let mock = MockLlmClient::new("test-model");
        mock.queue_text("Hello");

        let request = LlmRequest::system_and_user("system", "user", 0.3);
        let response = mock.complete(&request).await.unwrap();
        assert_eq!(response.text, "Hello");

        // Second call should fail (no more responses)
        let result = mock.complete(&request).await;
        assert!(result.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_platform_directory() {
        let platform = MockPlatform::new().with_room("r1", "general");
        assert_eq!(
            platform.room_by_name("general").await.unwrap().map(|r| r.id),
            Some("r1".to_string())
        );
        assert!(platform.room_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_store_counts_writes() {
        let store = InMemoryStateStore::new().with_state("alice", ConversationState::default());
        assert_eq!(store.write_count(), 0);
        store.set("alice", &ConversationState::default()).await.unwrap();
        assert_eq!(store.write_count(), 1);
    }
}
