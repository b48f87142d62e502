//! Interaction dispatcher
//!
//! Every I/O step is awaited in order; nothing runs concurrently within one
//! submission. Form submissions write conversation state only after a
//! non-empty regeneration, so a failed request leaves it untouched.

use super::submission::{FieldAddress, ViewSubmission, ViewTag};
use crate::db::ConversationState;
use crate::inference::{InferenceClient, InferenceInput, InferenceOutcome};
use crate::llm::LlmError;
use crate::platform::{InitiatorSummary, NotificationIcon, Platform, Room, StateStore, User};
use crate::prompt::{self, PromptMode};
use std::sync::Arc;
use thiserror::Error;

const INVALID_INPUT: &str = "Invalid Input!";
const FORWARDED: &str = "Message forwarded successfully!";
const REGENERATE_FAILED: &str = "AI could not regenerate. Please try again!";
const GENERATE_FAILED: &str = "AI could not generate a response. Please try again!";

/// Acknowledgment returned to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    Success,
    Failure,
}

impl Acknowledgment {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Failures that end a submission with a failure acknowledgment
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Inference failed: {0}")]
    Inference(#[from] LlmError),
    #[error("State store error: {0}")]
    Store(String),
    #[error("Platform error: {0}")]
    Platform(String),
    #[error("Unknown room: {0}")]
    UnknownRoom(String),
}

/// Routes submitted forms to forward, edit, or regenerate
pub struct InteractionDispatcher<S: StateStore, P: Platform> {
    store: S,
    platform: Arc<P>,
    inference: InferenceClient,
}

impl<S: StateStore, P: Platform> InteractionDispatcher<S, P> {
    pub fn new(store: S, platform: Arc<P>, inference: InferenceClient) -> Self {
        Self {
            store,
            platform,
            inference,
        }
    }

    /// Handle a submitted form.
    ///
    /// Unrecognized view tags are ignored. Errors are logged and turned into
    /// [`Acknowledgment::Failure`]; the user only sees the notifications sent
    /// along the way.
    pub async fn handle(&self, submission: &ViewSubmission) -> Acknowledgment {
        match self.dispatch(submission).await {
            Ok(()) => Acknowledgment::Success,
            Err(e) => {
                tracing::error!(
                    user_id = %submission.user.id,
                    view = %submission.view_id,
                    error = %e,
                    "Interaction failed"
                );
                Acknowledgment::Failure
            }
        }
    }

    async fn dispatch(&self, submission: &ViewSubmission) -> Result<(), DispatchError> {
        let Some(tag) = submission.tag() else {
            tracing::warn!(view = %submission.view_id, "Ignoring submission with unknown view id");
            return Ok(());
        };

        let user = &submission.user;
        let Some((state, origin)) = self.active_room(user).await? else {
            tracing::info!(user_id = %user.id, view = %tag, "No active room for submission");
            return Ok(());
        };

        tracing::info!(user_id = %user.id, room_id = %origin.id, view = %tag, "Handling submission");

        match tag {
            ViewTag::Forward => self.forward(user, &state, &origin, submission).await,
            ViewTag::Edit => self.edit(user, &origin, submission).await,
            ViewTag::Regenerate => self.regenerate(user, &state, &origin, submission).await,
        }
    }

    /// Send the stored response to another room, named on the form.
    async fn forward(
        &self,
        user: &User,
        state: &ConversationState,
        origin: &Room,
        submission: &ViewSubmission,
    ) -> Result<(), DispatchError> {
        let field = submission.field(FieldAddress::ROOM).unwrap_or_default();
        let name = field.trim();
        let Some(target) = self
            .platform
            .room_by_name(name)
            .await
            .map_err(DispatchError::Platform)?
        else {
            let text = format!("{name} - Invalid Room! Check if the room exists.");
            return self.notify(user, origin, &text, Some(NotificationIcon::Warning)).await;
        };

        if !state.has_response() {
            return self.notify(user, origin, INVALID_INPUT, None).await;
        }

        self.platform
            .send(&state.last_response, user, &target)
            .await
            .map_err(DispatchError::Platform)?;
        tracing::info!(user_id = %user.id, target_room = %target.id, "Forwarded response");

        self.notify(user, origin, FORWARDED, Some(NotificationIcon::Success)).await
    }

    /// Post the edited text, verbatim, into the active room.
    async fn edit(
        &self,
        user: &User,
        origin: &Room,
        submission: &ViewSubmission,
    ) -> Result<(), DispatchError> {
        let text = submission.field(FieldAddress::EDITOR).unwrap_or_default();
        if text.trim().is_empty() {
            return self.notify(user, origin, INVALID_INPUT, None).await;
        }

        self.platform
            .send(&text, user, origin)
            .await
            .map_err(DispatchError::Platform)
    }

    /// Rework the last response with a new emoji level and/or instruction.
    async fn regenerate(
        &self,
        user: &User,
        state: &ConversationState,
        origin: &Room,
        submission: &ViewSubmission,
    ) -> Result<(), DispatchError> {
        let emoji_level =
            prompt::parse_emoji_level(&submission.field(FieldAddress::EMOJI_LEVEL).unwrap_or_default());
        let instruction = submission.field(FieldAddress::INSTRUCTIONS).unwrap_or_default();

        let input = InferenceInput {
            mode: PromptMode::Redo {
                prior_response: &state.last_response,
                prior_emoji_level: state.last_emoji_level,
            },
            emoji_level,
            text: &instruction,
            temperature: None,
        };

        let response = match self.inference.infer(user, origin, &input).await? {
            InferenceOutcome::Generated(text) => text,
            InferenceOutcome::Empty => {
                return self.notify(user, origin, REGENERATE_FAILED, None).await;
            }
        };

        let updated = ConversationState {
            last_response: response.clone(),
            last_emoji_level: emoji_level,
            active_room_id: state.active_room_id.clone(),
        };
        self.save(user, &updated).await?;

        self.notify(user, origin, &response, None).await?;

        let user_text = if instruction.trim().is_empty() {
            prompt::emojify_label(emoji_level)
        } else {
            instruction
        };
        self.platform
            .post_initiator(user, origin, &InitiatorSummary { user_text, response })
            .await
            .map_err(DispatchError::Platform)
    }

    /// Start an interaction flow from the user's in-progress message.
    ///
    /// Scopes the flow to `room_id`, generates a first response with the
    /// user's stored emoji level and stores it. Returns `Ok(None)` when the
    /// message is blank or the model produced nothing; the user has been
    /// notified in both cases.
    pub async fn embellish(
        &self,
        user: &User,
        room_id: &str,
        text: &str,
    ) -> Result<Option<String>, DispatchError> {
        let room = self
            .platform
            .room_by_id(room_id)
            .await
            .map_err(DispatchError::Platform)?
            .ok_or_else(|| DispatchError::UnknownRoom(room_id.to_string()))?;

        if text.trim().is_empty() {
            self.notify(user, &room, INVALID_INPUT, None).await?;
            return Ok(None);
        }

        let mut state = self.load(user).await?.unwrap_or_default();
        state.active_room_id = Some(room.id.clone());
        state.last_response.clear();
        self.save(user, &state).await?;

        let input = InferenceInput {
            mode: PromptMode::Fresh,
            emoji_level: state.last_emoji_level,
            text,
            temperature: None,
        };

        let response = match self.inference.infer(user, &room, &input).await? {
            InferenceOutcome::Generated(response) => response,
            InferenceOutcome::Empty => {
                self.notify(user, &room, GENERATE_FAILED, None).await?;
                return Ok(None);
            }
        };

        state.last_response.clone_from(&response);
        self.save(user, &state).await?;

        self.platform
            .post_initiator(
                user,
                &room,
                &InitiatorSummary {
                    user_text: text.to_string(),
                    response: response.clone(),
                },
            )
            .await
            .map_err(DispatchError::Platform)?;

        tracing::info!(user_id = %user.id, room_id = %room.id, "Started interaction flow");
        Ok(Some(response))
    }

    /// Load the user's state and resolve its active room.
    async fn active_room(&self, user: &User) -> Result<Option<(ConversationState, Room)>, DispatchError> {
        let Some(state) = self.load(user).await? else {
            return Ok(None);
        };
        let Some(room_id) = state.active_room_id.as_deref() else {
            return Ok(None);
        };
        let room = self
            .platform
            .room_by_id(room_id)
            .await
            .map_err(DispatchError::Platform)?;
        Ok(room.map(|room| (state, room)))
    }

    async fn load(&self, user: &User) -> Result<Option<ConversationState>, DispatchError> {
        self.store.get(&user.id).await.map_err(DispatchError::Store)
    }

    async fn save(&self, user: &User, state: &ConversationState) -> Result<(), DispatchError> {
        self.store.set(&user.id, state).await.map_err(DispatchError::Store)
    }

    async fn notify(
        &self,
        user: &User,
        room: &Room,
        text: &str,
        icon: Option<NotificationIcon>,
    ) -> Result<(), DispatchError> {
        self.platform
            .notify(user, room, text, icon)
            .await
            .map_err(DispatchError::Platform)
    }
}
