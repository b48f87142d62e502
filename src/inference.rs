//! Inference pipeline: prompt assembly, completion call, output sanitization
//!
//! Transport failures notify the user and are returned as errors; protocol
//! failures (a body that is not a chat completion) are returned as errors
//! without a notification. A completion whose sanitized text is empty is not
//! an error but [`InferenceOutcome::Empty`], so callers can tell "failed"
//! from "returned nothing".

use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::platform::{NotificationIcon, Notifier, Room, User};
use crate::prompt::{self, PromptConfig, PromptMode, UseCase};
use std::sync::Arc;

pub const TRANSPORT_FAILURE_NOTICE: &str = "Something is wrong with AI. Please try again later";

/// What to generate
#[derive(Debug, Clone, Copy)]
pub struct InferenceInput<'a> {
    pub mode: PromptMode<'a>,
    pub emoji_level: u8,
    /// Message text for fresh requests, free-text instruction for redo
    pub text: &'a str,
    /// Overrides the configured temperature
    pub temperature: Option<f32>,
}

/// Result of a completed inference call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// Sanitized, non-empty model output
    Generated(String),
    /// The model answered but nothing usable was left after sanitizing
    Empty,
}

pub struct InferenceClient {
    llm: Arc<dyn LlmService>,
    notifier: Arc<dyn Notifier>,
    use_case: UseCase,
    temperature: f32,
}

impl InferenceClient {
    pub fn new(
        llm: Arc<dyn LlmService>,
        notifier: Arc<dyn Notifier>,
        use_case: UseCase,
        temperature: f32,
    ) -> Self {
        Self {
            llm,
            notifier,
            use_case,
            temperature,
        }
    }

    pub fn build_request(&self, input: &InferenceInput<'_>) -> LlmRequest {
        let assembled = prompt::assemble(&PromptConfig {
            use_case: self.use_case,
            mode: input.mode,
            emoji_level: input.emoji_level,
            text: input.text,
        });
        LlmRequest::system_and_user(
            assembled.system,
            assembled.user,
            input.temperature.unwrap_or(self.temperature),
        )
    }

    /// Run one inference for `user`; failure notices go to `room`.
    pub async fn infer(
        &self,
        user: &User,
        room: &Room,
        input: &InferenceInput<'_>,
    ) -> Result<InferenceOutcome, LlmError> {
        let request = self.build_request(input);

        tracing::debug!(
            user_id = %user.id,
            use_case = %self.use_case,
            redo = input.mode.is_redo(),
            emoji_level = input.emoji_level,
            "Requesting completion"
        );

        let response = match self.llm.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_transport() {
                    if let Err(notify_err) = self
                        .notifier
                        .notify(user, room, TRANSPORT_FAILURE_NOTICE, Some(NotificationIcon::Warning))
                        .await
                    {
                        tracing::warn!(error = %notify_err, "Failed to send transport failure notice");
                    }
                }
                return Err(e);
            }
        };

        let text = prompt::sanitize(&response.text);
        if text.is_empty() {
            tracing::info!(user_id = %user.id, "Completion was empty after sanitizing");
            Ok(InferenceOutcome::Empty)
        } else {
            Ok(InferenceOutcome::Generated(text))
        }
    }
}
