//! Trait abstractions for platform I/O
//!
//! These traits enable testing the dispatcher with mock implementations.

use super::{InitiatorSummary, NotificationIcon, Room, User};
use crate::db::{ConversationState, Database};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for per-user conversation state
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the state for a user, `None` before the first interaction
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>, String>;

    /// Replace the state for a user
    async fn set(&self, user_id: &str, state: &ConversationState) -> Result<(), String>;
}

/// Room lookups
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn room_by_id(&self, room_id: &str) -> Result<Option<Room>, String>;

    async fn room_by_name(&self, name: &str) -> Result<Option<Room>, String>;
}

/// Posting messages into rooms
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post `text` into `room` on behalf of `as_user`
    async fn send(&self, text: &str, as_user: &User, room: &Room) -> Result<(), String>;

    /// Post the instruction/response summary for a generation
    async fn post_initiator(
        &self,
        user: &User,
        room: &Room,
        summary: &InitiatorSummary,
    ) -> Result<(), String>;
}

/// User-local feedback, distinct from a posted message
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        user: &User,
        room: &Room,
        text: &str,
        icon: Option<NotificationIcon>,
    ) -> Result<(), String>;
}

/// Everything the dispatcher needs from the host platform
pub trait Platform: RoomDirectory + Messenger + Notifier {}
impl<T: RoomDirectory + Messenger + Notifier> Platform for T {}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>, String> {
        (**self).get(user_id).await
    }

    async fn set(&self, user_id: &str, state: &ConversationState) -> Result<(), String> {
        (**self).set(user_id, state).await
    }
}

#[async_trait]
impl<T: RoomDirectory + ?Sized> RoomDirectory for Arc<T> {
    async fn room_by_id(&self, room_id: &str) -> Result<Option<Room>, String> {
        (**self).room_by_id(room_id).await
    }

    async fn room_by_name(&self, name: &str) -> Result<Option<Room>, String> {
        (**self).room_by_name(name).await
    }
}

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    async fn send(&self, text: &str, as_user: &User, room: &Room) -> Result<(), String> {
        (**self).send(text, as_user, room).await
    }

    async fn post_initiator(
        &self,
        user: &User,
        room: &Room,
        summary: &InitiatorSummary,
    ) -> Result<(), String> {
        (**self).post_initiator(user, room, summary).await
    }
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn notify(
        &self,
        user: &User,
        room: &Room,
        text: &str,
        icon: Option<NotificationIcon>,
    ) -> Result<(), String> {
        (**self).notify(user, room, text, icon).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as a StateStore
#[derive(Clone)]
pub struct DatabaseStateStore {
    db: Database,
}

impl DatabaseStateStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateStore for DatabaseStateStore {
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>, String> {
        self.db.get_state(user_id).map_err(|e| e.to_string())
    }

    async fn set(&self, user_id: &str, state: &ConversationState) -> Result<(), String> {
        self.db.put_state(user_id, state).map_err(|e| e.to_string())
    }
}
