//! The structural actions `StyleRenderer::render` accepts (spec §4.6).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slots the renderer personalizes acknowledgments and confirmations by.
/// Fixed order everywhere the spec cares about order: name, phone,
/// address, time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Name,
    Phone,
    Address,
    Time,
}

impl SlotKind {
    pub const ORDER: [SlotKind; 4] = [SlotKind::Name, SlotKind::Phone, SlotKind::Address, SlotKind::Time];

    pub fn key(&self) -> &'static str {
        match self {
            SlotKind::Name => "name",
            SlotKind::Phone => "phone",
            SlotKind::Address => "address",
            SlotKind::Time => "time",
        }
    }
}

/// A structural action for the style renderer to turn into an utterance.
/// The exact wording for `AskSlot`/`Clarify` comes from template config at
/// the call site — the renderer only supplies acknowledgment framing and
/// slot-ordered summarization, never invents question text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    AskSlot { slot: SlotKind, question: String },
    Clarify { prompt: String },
    ConfirmBooking,
    Escalate { reason: String },
    Greeting,
    Fallback { message: String },
    Error { message: String },
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::AskSlot { .. } => "ASK_SLOT",
            Action::Clarify { .. } => "CLARIFY",
            Action::ConfirmBooking => "CONFIRM_BOOKING",
            Action::Escalate { .. } => "ESCALATE",
            Action::Greeting => "GREETING",
            Action::Fallback { .. } => "FALLBACK",
            Action::Error { .. } => "ERROR",
        }
    }

    /// The slot the renderer expects the caller to answer next, if any.
    pub fn expecting(&self) -> Option<SlotKind> {
        match self {
            Action::AskSlot { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

/// Slots captured so far in the call, keyed by `SlotKind::key()`.
pub type SlotValues = HashMap<String, String>;
