//! Stage 5 — entity extraction. Spec §4.1.5.

use once_cell::sync::Lazy;
use receptionist_core::{CustomEntityPattern, Entities, NameDictionary};
use regex::Regex;

// Strictly ordered: the honorific form is tried first so "I'm Dr Smith"
// strips the honorific instead of falling through to the generic form below.
static NAME_HONORIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi'?m\s+(mr|mrs|ms|miss|dr|prof|mister|doctor)\.?\s+([a-z]+)(?:\s+([a-z]+))?").unwrap()
});
static NAME_MY_NAME_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmy name is\s+([a-z]+)(?:\s+([a-z]+))?").unwrap());
static NAME_THIS_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:this is|i'?m|i am)\s+([a-z]+)(?:\s+([a-z]+))?").unwrap());
static NAME_CALL_ME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcall me\s+([a-z]+)").unwrap());
static NAME_FIRST_NAME_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfirst name is\s+([a-z]+)").unwrap());
static NAME_LAST_NAME_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\blast name is\s+([a-z]+)").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\+?1[\s\-.]?)?\(?\d{3}\)?[\s\-.]?\d{3}[\s\-.]?\d{4}").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s+[A-Za-z0-9.'\s]+?\s(?:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way)\.?").unwrap()
});

/// Run the ordered cascade (name, phone, email, address) over the raw
/// utterance, then evaluate any template-supplied custom entity patterns.
/// `name_dict`, when present, resolves ambiguity between first/last name
/// capture groups; without it the first captured word is treated as the
/// first name and the second, if any, as the last name.
pub async fn extract_entities(
    raw_text: &str,
    custom_patterns: &[CustomEntityPattern],
    name_dict: Option<&dyn NameDictionary>,
) -> Entities {
    let mut entities = Entities::default();

    if let Some(caps) = NAME_HONORIFIC.captures(raw_text) {
        let first = caps.get(2).map(|m| m.as_str().to_string());
        let second = caps.get(3).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, first, second, name_dict).await;
    } else if let Some(caps) = NAME_MY_NAME_IS.captures(raw_text) {
        let first = caps.get(1).map(|m| m.as_str().to_string());
        let second = caps.get(2).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, first, second, name_dict).await;
    } else if let Some(caps) = NAME_THIS_IS.captures(raw_text) {
        let first = caps.get(1).map(|m| m.as_str().to_string());
        let second = caps.get(2).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, first, second, name_dict).await;
    } else if let Some(caps) = NAME_CALL_ME.captures(raw_text) {
        let first = caps.get(1).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, first, None, name_dict).await;
    } else if let Some(caps) = NAME_FIRST_NAME_IS.captures(raw_text) {
        let first = caps.get(1).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, first, None, name_dict).await;
    } else if let Some(caps) = NAME_LAST_NAME_IS.captures(raw_text) {
        let last = caps.get(1).map(|m| m.as_str().to_string());
        resolve_name(&mut entities, None, last, name_dict).await;
    }

    if let Some(m) = PHONE.find(raw_text) {
        entities.phone = Some(m.as_str().to_string());
    }

    if let Some(m) = EMAIL.find(raw_text) {
        entities.email = Some(m.as_str().to_string());
    }

    if let Some(m) = ADDRESS.find(raw_text) {
        entities.address = Some(m.as_str().trim().to_string());
    }

    for pattern in custom_patterns {
        if let Ok(re) = Regex::new(&pattern.regex) {
            if let Some(m) = re.find(raw_text) {
                entities.custom.insert(pattern.name.clone(), m.as_str().to_string());
            }
        }
    }

    entities
}

async fn resolve_name(
    entities: &mut Entities,
    first: Option<String>,
    second: Option<String>,
    name_dict: Option<&dyn NameDictionary>,
) {
    match (first, second) {
        (Some(a), Some(b)) => {
            if let Some(dict) = name_dict {
                let (first_ok, last_ok) = (dict.is_first_name(&a).await, dict.is_last_name(&b).await);
                entities.name_validated = first_ok && last_ok;
                if !first_ok && dict.is_first_name(&b).await {
                    entities.first_name = Some(b.clone());
                    entities.last_name = Some(a.clone());
                } else {
                    entities.first_name = Some(a.clone());
                    entities.last_name = Some(b.clone());
                }
            } else {
                entities.first_name = Some(a.clone());
                entities.last_name = Some(b.clone());
            }
            entities.full_name = Some(format!(
                "{} {}",
                entities.first_name.clone().unwrap_or_default(),
                entities.last_name.clone().unwrap_or_default()
            ));
        }
        (Some(a), None) => {
            if let Some(dict) = name_dict {
                entities.name_validated = dict.is_first_name(&a).await;
            }
            entities.first_name = Some(a.clone());
            entities.full_name = Some(a);
        }
        (None, Some(b)) => {
            if let Some(dict) = name_dict {
                entities.name_validated = dict.is_last_name(&b).await;
            }
            entities.last_name = Some(b.clone());
            entities.full_name = Some(b);
        }
        (None, None) => {}
    }
}
