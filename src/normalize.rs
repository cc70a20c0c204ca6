//! Record normalization: raw feed values → canonical `Practitioner`.
//!
//! Every function here is total. A missing or malformed field resolves to
//! its documented default, never to an error. Each raw field type has exactly
//! one parsing function so the "malformed → default" policy lives in one place.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{
    ConsultationMode, Practitioner, RawRecord, DEFAULT_RATING, UNKNOWN_LOCATION, UNKNOWN_NAME,
};

/// First contiguous run of ASCII digits in free text ("15 years" → "15").
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Normalize a whole feed, preserving source order and length.
pub fn normalize(raw_records: Vec<Value>) -> Vec<Practitioner> {
    raw_records
        .into_iter()
        .map(|value| normalize_record(RawRecord::from_value(value)))
        .collect()
}

pub fn normalize_record(raw: RawRecord) -> Practitioner {
    Practitioner {
        id: extract_id(&raw.id),
        name: non_empty_string(&raw.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        specialties: extract_specialties(&raw.specialities),
        experience_years: extract_count(&raw.experience),
        fee: extract_count(&raw.fees),
        consultation_modes: extract_modes(&raw.video_consult, &raw.in_clinic),
        rating: DEFAULT_RATING,
        location: non_empty_string(raw.city()).unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        picture: non_empty_string(&raw.photo),
    }
}

// ─── Field parsers ───────────────────────────────────────────────────────────

/// Numeric extraction shared by experience and fee.
///
/// Unsigned integers are used verbatim, other non-negative finite numbers
/// are truncated. Strings yield their first digit run. Everything else is 0.
/// Values beyond `u32::MAX` saturate.
pub fn extract_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                saturate(u)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 => {
                        if f >= u32::MAX as f64 {
                            u32::MAX
                        } else {
                            f.trunc() as u32
                        }
                    }
                    _ => 0,
                }
            }
        }
        Value::String(s) => match DIGIT_RUN.find(s) {
            Some(m) => m.as_str().parse::<u64>().map(saturate).unwrap_or(u32::MAX),
            None => 0,
        },
        _ => 0,
    }
}

/// Names of the specialty objects, empty names dropped.
pub fn extract_specialties(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("name").and_then(non_empty_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Video before clinic; each flag tested independently.
pub fn extract_modes(video_flag: &Value, clinic_flag: &Value) -> Vec<ConsultationMode> {
    let mut modes = Vec::with_capacity(2);
    if is_truthy(video_flag) {
        modes.push(ConsultationMode::VideoConsult);
    }
    if is_truthy(clinic_flag) {
        modes.push(ConsultationMode::InClinic);
    }
    modes
}

/// Source id, or a generated placeholder. Placeholders are unique within a
/// load but change across reloads.
pub fn extract_id(value: &Value) -> String {
    match value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) if is_truthy(value) => n.to_string(),
        _ => format!("generated-{}", Uuid::new_v4()),
    }
}

/// Loose truthiness of the feed's flag fields.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn saturate(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
