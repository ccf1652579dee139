//! C6: StyleRenderer — turns a structural action into a concrete utterance
//! without ever calling an LLM (spec §4.6). Grounded on the teacher's
//! `core/src/traits/persona_provider.rs` (`ToneConfig`: greeting/closing
//! looked up by key, never generated) and `agent/src/persuasion.rs`'s
//! fixed-variant-array posture for objection responses. The seeded
//! variant selector (`lcg`) has no teacher analogue — see DESIGN.md.

pub mod acknowledgment;
pub mod action;
pub mod confirm;
pub mod lcg;

use action::{Action, SlotKind, SlotValues};
use lcg::SeededSequence;
use receptionist_core::{CompanyProfile, Template};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedUtterance {
    pub say: String,
    pub action: String,
    pub expecting: Option<SlotKind>,
    pub trace: Vec<String>,
}

/// Renders a structural action into an utterance. `session_id`/`turn_index`
/// seed the deterministic variant selector; `just_extracted` is the slot
/// (and value) the preprocessor pulled out of this turn, if any;
/// `captured_slots` is everything captured so far in the call, used by
/// `CONFIRM_BOOKING`.
pub fn render(
    action: &Action,
    company: &CompanyProfile,
    template: &Template,
    session_id: &str,
    turn_index: u32,
    just_extracted: Option<(SlotKind, &str)>,
    captured_slots: &SlotValues,
) -> RenderedUtterance {
    let mut seq = SeededSequence::new(session_id, turn_index);
    let mut trace = Vec::new();

    let say = match action {
        Action::Greeting => {
            let text = seq
                .pick(&template.greetings)
                .cloned()
                .unwrap_or_else(|| "Hello! How can I help you today?".to_string());
            trace.push("picked greeting variant".to_string());
            text
        }
        Action::AskSlot { question, .. } => {
            let ack = acknowledgment::choose(just_extracted, &company.conversation_style, &company.acknowledgment_overrides, &mut seq);
            trace.push(format!("acknowledgment: {ack}"));
            format!("{ack} {question}")
        }
        Action::Clarify { prompt } => {
            let ack = acknowledgment::choose(just_extracted, &company.conversation_style, &company.acknowledgment_overrides, &mut seq);
            trace.push(format!("acknowledgment: {ack}"));
            format!("{ack} {prompt}")
        }
        Action::ConfirmBooking => {
            let ack = acknowledgment::choose(just_extracted, &company.conversation_style, &company.acknowledgment_overrides, &mut seq);
            let summary = confirm::summarize(captured_slots);
            trace.push(format!("acknowledgment: {ack}"));
            trace.push("summarized captured slots".to_string());
            format!("{ack} {summary}")
        }
        Action::Escalate { reason } => {
            trace.push("escalation, no acknowledgment framing".to_string());
            reason.clone()
        }
        Action::Fallback { message } => {
            trace.push("fallback, no acknowledgment framing".to_string());
            message.clone()
        }
        Action::Error { message } => {
            trace.push("error, no acknowledgment framing".to_string());
            message.clone()
        }
    };

    RenderedUtterance { say, action: action.tag().to_string(), expecting: action.expecting(), trace }
}
