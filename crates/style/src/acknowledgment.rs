//! Acknowledgment personalization (spec §4.6): personalize first by a slot
//! just extracted this turn, else by the company's conversation style,
//! with UI-configured overrides replacing either variant bank.

use crate::action::SlotKind;
use crate::lcg::SeededSequence;
use std::collections::HashMap;

fn default_slot_variants(slot: SlotKind) -> Vec<String> {
    match slot {
        SlotKind::Name => vec![
            "Thanks, {value}.".to_string(),
            "Got it, {value}.".to_string(),
            "Nice to meet you, {value}.".to_string(),
        ],
        SlotKind::Phone => vec!["Perfect, got that number.".to_string(), "Thanks, noted your number.".to_string()],
        SlotKind::Address => vec!["Got the address, thanks.".to_string(), "Noted that address.".to_string()],
        SlotKind::Time => vec!["Great, that time works.".to_string(), "Noted, thanks.".to_string()],
    }
}

fn default_style_variants(conversation_style: &str) -> Vec<String> {
    match conversation_style {
        "confident" => vec!["Got it.".to_string(), "Noted.".to_string()],
        "polite" => vec!["Thank you very much.".to_string(), "I appreciate that, thank you.".to_string()],
        _ => vec!["Thanks, got that.".to_string(), "Okay, noted.".to_string()],
    }
}

/// `just_extracted` is the slot (and its value) the preprocessor pulled out
/// of *this* turn, if any. When present it takes priority over the
/// company's conversation style.
pub fn choose(
    just_extracted: Option<(SlotKind, &str)>,
    conversation_style: &str,
    overrides: &HashMap<String, Vec<String>>,
    seq: &mut SeededSequence,
) -> String {
    let (key, defaults, substitute): (String, Vec<String>, Option<&str>) = match just_extracted {
        Some((slot, value)) => (slot.key().to_string(), default_slot_variants(slot), Some(value)),
        None => (conversation_style.to_string(), default_style_variants(conversation_style), None),
    };

    let variants = overrides.get(&key).filter(|v| !v.is_empty()).cloned().unwrap_or(defaults);
    let picked = seq.pick(&variants).cloned().unwrap_or_else(|| "Thanks.".to_string());

    match substitute {
        Some(value) => picked.replace("{value}", value),
        None => picked,
    }
}
