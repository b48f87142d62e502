//! Prompt construction for embellish and regenerate requests
//!
//! Pure functions only: given the configured use case, the redo context and
//! the new input, produce the system message and the user turn. The same
//! delimiter literals are stripped from model output by [`sanitize`] so they
//! never reach the chat or the next regenerate cycle.

#[cfg(test)]
mod proptests;

use std::fmt;

/// Wraps the user's message in a fresh (non-redo) prompt
pub const DELIMITER: &str = "<>";

/// Wraps a free-text instruction in a redo prompt
pub const INSTRUCTION_MARKER: &str = "--";

/// Emoji intensity used when none was stored or the form value is unusable
pub const DEFAULT_EMOJI_LEVEL: u8 = 50;

const MAX_EMOJI_LEVEL: i64 = 100;

/// Persona the model writes as, selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseCase {
    EventPromotions,
    CustomerSupport,
    HealthcareSupport,
    #[default]
    Communication,
}

impl UseCase {
    /// Map a configuration value to a use case; unknown values get the
    /// general communication persona.
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "event-promotions" => Self::EventPromotions,
            "customer-support" => Self::CustomerSupport,
            "healthcare-support" => Self::HealthcareSupport,
            _ => Self::Communication,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EventPromotions => "event-promotions",
            Self::CustomerSupport => "customer-support",
            Self::HealthcareSupport => "healthcare-support",
            Self::Communication => "communication",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the request starts from fresh text or reworks the last response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode<'a> {
    Fresh,
    Redo {
        prior_response: &'a str,
        prior_emoji_level: u8,
    },
}

impl PromptMode<'_> {
    pub fn is_redo(&self) -> bool {
        matches!(self, Self::Redo { .. })
    }
}

/// Inputs to prompt assembly
#[derive(Debug, Clone, Copy)]
pub struct PromptConfig<'a> {
    pub use_case: UseCase,
    pub mode: PromptMode<'a>,
    pub emoji_level: u8,
    /// Message text for fresh requests, free-text instruction for redo
    pub text: &'a str,
}

/// System message and user turn ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub system: String,
    pub user: String,
}

pub fn assemble(config: &PromptConfig<'_>) -> AssembledPrompt {
    AssembledPrompt {
        system: system_message(config.use_case, config.mode, config.emoji_level),
        user: user_prompt(config.mode, config.text, config.emoji_level),
    }
}

/// Build the system message for a use case.
///
/// Redo requests embed the prior response and its emoji level so the model
/// edits the previous text instead of starting over.
pub fn system_message(use_case: UseCase, mode: PromptMode<'_>, emoji_level: u8) -> String {
    let persona = match use_case {
        UseCase::EventPromotions => event_promotions(),
        UseCase::CustomerSupport => customer_support(),
        UseCase::HealthcareSupport => healthcare_support(),
        UseCase::Communication => communication(),
    };

    let task = match mode {
        PromptMode::Fresh => fresh_task(emoji_level),
        PromptMode::Redo {
            prior_response,
            prior_emoji_level,
        } => redo_task(prior_response, prior_emoji_level, emoji_level),
    };

    format!("{persona}\n\n{task}")
}

/// Build the user turn.
pub fn user_prompt(mode: PromptMode<'_>, text: &str, emoji_level: u8) -> String {
    match mode {
        PromptMode::Fresh => format!("{DELIMITER} {text} {DELIMITER}"),
        PromptMode::Redo { .. } if text.trim().is_empty() => emojify_label(emoji_level),
        PromptMode::Redo { .. } => {
            format!("{INSTRUCTION_MARKER} {} {INSTRUCTION_MARKER}", strip_markers(text))
        }
    }
}

/// Prompt (and summary label) used when a regenerate carries no instruction.
pub fn emojify_label(emoji_level: u8) -> String {
    format!("Emojify text: {emoji_level}%")
}

/// Parse the emoji dial from its form field.
///
/// Unparsable input falls back to [`DEFAULT_EMOJI_LEVEL`]; out-of-range
/// numbers are clamped to 0..=100.
pub fn parse_emoji_level(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(level) => u8::try_from(level.clamp(0, MAX_EMOJI_LEVEL)).unwrap_or(DEFAULT_EMOJI_LEVEL),
        Err(_) => DEFAULT_EMOJI_LEVEL,
    }
}

/// Strip delimiter and instruction-marker literals from model output.
///
/// Bracket characters go first so a pair split by a stray bracket cannot
/// survive; dash runs then collapse pairwise, which leaves no `--` behind.
/// Applying this to its own output is a no-op.
pub fn sanitize(text: &str) -> String {
    strip_markers(text).trim().to_string()
}

/// Remove bracket characters, then instruction markers, leaving spacing as is.
fn strip_markers(text: &str) -> String {
    text.replace(['<', '>'], "").replace(INSTRUCTION_MARKER, "")
}

fn event_promotions() -> &'static str {
    "You are a writing assistant for event and promotion announcements in a team chat. \
     Turn the author's message into an inviting announcement that makes people want to attend or take part. \
     Keep every date, time, place, price and link exactly as written, and never invent details."
}

fn customer_support() -> &'static str {
    "You are a writing assistant for customer support agents replying in a chat. \
     Make the agent's reply clear, polite and empathetic while keeping it accurate. \
     Never promise anything the agent did not promise and never change facts, order numbers or steps."
}

fn healthcare_support() -> &'static str {
    "You are a writing assistant for healthcare support staff messaging patients and colleagues. \
     Keep the tone calm, respectful and reassuring. \
     Never add medical advice, and keep every clinical detail, dosage and appointment exactly as written."
}

fn communication() -> &'static str {
    "You are a writing assistant that improves everyday chat messages. \
     Make the message read clearly and naturally while keeping the author's meaning, voice and language."
}

fn fresh_task(emoji_level: u8) -> String {
    format!(
        "The message to improve is enclosed between {DELIMITER} delimiters. \
         Rewrite it and add emojis at an intensity of {emoji_level}% \
         (0% means no emojis, 100% means an emoji wherever one fits). \
         Reply with the rewritten message only: no delimiters, no quotes, no commentary."
    )
}

fn redo_task(prior_response: &str, prior_emoji_level: u8, emoji_level: u8) -> String {
    format!(
        "You previously rewrote a message into the text below, using an emoji intensity of {prior_emoji_level}%:\n\
         {prior_response}\n\n\
         The author wants a new version of that text. \
         Their instructions are enclosed between {INSTRUCTION_MARKER} markers; apply them to the previous text. \
         If the author only sends `Emojify text: N%`, rewrite the previous text with an emoji intensity of N%. \
         Otherwise aim for an emoji intensity of {emoji_level}%. \
         Reply with the new text only: no markers, no quotes, no commentary."
    )
}
