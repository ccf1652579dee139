//! Confirmation-message summarization (spec §4.6): collected slots in a
//! fixed order — name, phone, address, time — followed by a yes/no
//! question.

use crate::action::{SlotKind, SlotValues};

pub fn summarize(slots: &SlotValues) -> String {
    let parts: Vec<String> = SlotKind::ORDER
        .iter()
        .filter_map(|slot| slots.get(slot.key()).map(|value| format!("{} {}", slot.key(), value)))
        .collect();

    if parts.is_empty() {
        return "Can you confirm those details are correct?".to_string();
    }

    format!("Let me confirm: {}. Is that correct?", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn summarizes_in_fixed_slot_order_regardless_of_insertion_order() {
        let mut slots = HashMap::new();
        slots.insert("time".to_string(), "3pm".to_string());
        slots.insert("name".to_string(), "Jordan".to_string());
        slots.insert("phone".to_string(), "555-0100".to_string());

        let summary = summarize(&slots);
        let name_pos = summary.find("name Jordan").unwrap();
        let phone_pos = summary.find("phone 555-0100").unwrap();
        let time_pos = summary.find("time 3pm").unwrap();
        assert!(name_pos < phone_pos);
        assert!(phone_pos < time_pos);
        assert!(summary.ends_with("Is that correct?"));
    }

    #[test]
    fn skips_slots_that_were_never_captured() {
        let mut slots = HashMap::new();
        slots.insert("name".to_string(), "Jordan".to_string());
        let summary = summarize(&slots);
        assert!(summary.contains("name Jordan"));
        assert!(!summary.contains("phone"));
    }

    #[test]
    fn no_slots_falls_back_to_a_generic_question() {
        let slots = HashMap::new();
        assert_eq!(summarize(&slots), "Can you confirm those details are correct?");
    }
}
