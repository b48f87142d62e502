//! Property-based tests for prompt assembly and sanitization

use super::*;
use proptest::prelude::*;

/// Message or instruction text free of marker characters
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.!?,'🎉]{0,80}"
}

fn arb_non_blank_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.!?,'🎉][a-zA-Z0-9 _.!?,'🎉]{0,79}"
}

/// Instruction text that may contain delimiter and marker characters
fn arb_instruction() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9<>_.!?-][a-zA-Z0-9 <>_.!?-]{0,79}"
}

fn arb_use_case() -> impl Strategy<Value = UseCase> {
    prop_oneof![
        Just(UseCase::EventPromotions),
        Just(UseCase::CustomerSupport),
        Just(UseCase::HealthcareSupport),
        Just(UseCase::Communication),
    ]
}

/// Arbitrary model output, markers included
fn arb_model_output() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("<>".to_string()),
            Just("--".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("-".to_string()),
            "[a-zA-Z0-9 !?.]{0,10}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn fresh_prompt_is_text_between_delimiters(text in ".{0,100}", level in 0u8..=100) {
        let prompt = user_prompt(PromptMode::Fresh, &text, level);
        prop_assert_eq!(prompt, format!("{DELIMITER} {text} {DELIMITER}"));
    }

    #[test]
    fn redo_prompt_wraps_instruction_without_delimiters(
        instruction in arb_instruction(),
        prior in arb_text(),
        prior_level in 0u8..=100,
        level in 0u8..=100,
    ) {
        let mode = PromptMode::Redo { prior_response: &prior, prior_emoji_level: prior_level };
        let prompt = user_prompt(mode, &instruction, level);
        prop_assert!(!prompt.contains(DELIMITER));
        let inner = prompt
            .strip_prefix(&format!("{INSTRUCTION_MARKER} "))
            .and_then(|rest| rest.strip_suffix(&format!(" {INSTRUCTION_MARKER}")));
        prop_assert!(inner.is_some_and(|inner| !inner.contains(INSTRUCTION_MARKER)));
    }

    #[test]
    fn redo_prompt_keeps_plain_instruction_text(
        instruction in arb_non_blank_text(),
        level in 0u8..=100,
    ) {
        let mode = PromptMode::Redo { prior_response: "previous", prior_emoji_level: 50 };
        let wrapped = format!("{INSTRUCTION_MARKER} {instruction} {INSTRUCTION_MARKER}");
        prop_assert_eq!(user_prompt(mode, &instruction, level), wrapped);
    }

    #[test]
    fn blank_redo_prompt_is_emojify_label(blank in "[ \t\n]{0,5}", level in 0u8..=100) {
        let mode = PromptMode::Redo { prior_response: "previous", prior_emoji_level: 50 };
        prop_assert_eq!(user_prompt(mode, &blank, level), format!("Emojify text: {level}%"));
    }

    #[test]
    fn redo_system_message_carries_prior_response(
        use_case in arb_use_case(),
        prior in arb_non_blank_text(),
        prior_level in 0u8..=100,
    ) {
        let mode = PromptMode::Redo { prior_response: &prior, prior_emoji_level: prior_level };
        let system = system_message(use_case, mode, 50);
        prop_assert!(system.contains(prior.as_str()));
        let prior_intensity = format!("{prior_level}%");
        prop_assert!(system.contains(&prior_intensity));
    }

    #[test]
    fn assembly_is_deterministic(use_case in arb_use_case(), text in arb_text(), level in 0u8..=100) {
        let config = PromptConfig { use_case, mode: PromptMode::Fresh, emoji_level: level, text: &text };
        prop_assert_eq!(assemble(&config), assemble(&config));
    }

    #[test]
    fn sanitize_removes_every_marker(output in arb_model_output()) {
        let clean = sanitize(&output);
        prop_assert!(!clean.contains('<'));
        prop_assert!(!clean.contains('>'));
        prop_assert!(!clean.contains(INSTRUCTION_MARKER));
    }

    #[test]
    fn sanitize_is_idempotent(output in arb_model_output()) {
        let once = sanitize(&output);
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    #[test]
    fn unparsable_emoji_level_uses_default(raw in "[a-zA-Z%. ]{0,10}") {
        prop_assume!(raw.trim().parse::<i64>().is_err());
        prop_assert_eq!(parse_emoji_level(&raw), DEFAULT_EMOJI_LEVEL);
    }

    #[test]
    fn parsed_emoji_level_stays_in_range(n in any::<i64>()) {
        prop_assert!(parse_emoji_level(&n.to_string()) <= 100);
    }
}
