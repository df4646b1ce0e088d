//! Display helpers for the open-vocabulary `absenceType` tag.

use crate::i18n::Translator;

/// Aliases for tags that do not match a catalog key once normalized.
const COMMON_ALIASES: &[(&str, &str)] = &[
    ("ANNUAL LEAVE", "ANNUAL_LEAVE"),
    ("SICK LEAVE", "SICK_LEAVE"),
    ("SICK", "SICKNESS"),
    ("VACATION", "VACATION"),
    ("HOLIDAY", "HOLIDAY"),
    ("PERSONAL", "PERSONAL"),
    ("MATERNITY", "MATERNITY"),
    ("PATERNITY", "PATERNITY"),
];

/// Normalize a tag into catalog form: upper case, whitespace runs as `_`.
fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Translate an absence type tag, falling back to the raw tag.
pub fn translate_absence_type(translator: &Translator, raw: &str) -> String {
    let normalized = normalize(raw);
    let key = format!("table.absenceTypes.{normalized}");
    if translator.has(&key) {
        return translator.t(&key);
    }

    let upper = raw.trim().to_uppercase();
    let alias = COMMON_ALIASES
        .iter()
        .find(|(from, _)| *from == upper || *from == normalized)
        .map(|(_, to)| *to);
    if let Some(alias) = alias {
        let key = format!("table.absenceTypes.{alias}");
        if translator.has(&key) {
            return translator.t(&key);
        }
    }

    raw.to_string()
}

/// Colour family used for an absence type badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceTone {
    Blue,
    Red,
    Purple,
    Pink,
    Gray,
}

impl AbsenceTone {
    pub fn for_type(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("vacation") || lower.contains("holiday") {
            AbsenceTone::Blue
        } else if lower.contains("sick") {
            AbsenceTone::Red
        } else if lower.contains("personal") {
            AbsenceTone::Purple
        } else if lower.contains("maternity") || lower.contains("paternity") {
            AbsenceTone::Pink
        } else {
            AbsenceTone::Gray
        }
    }
}
