use serde::{Deserialize, Serialize};

use super::enums::ConsultationMode;

/// Name used when the source record carries none.
pub const UNKNOWN_NAME: &str = "Unknown Doctor";

/// Location used when the source record has no clinic city.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// The source feed has no rating field; every practitioner gets this value.
pub const DEFAULT_RATING: f32 = 4.5;

/// Canonical normalized doctor record.
///
/// `specialties` and `consultation_modes` are always present, possibly empty.
/// `consultation_modes` holds each mode at most once, video before clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: String,
    pub name: String,
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub fee: u32,
    pub consultation_modes: Vec<ConsultationMode>,
    pub rating: f32,
    pub location: String,
    pub picture: Option<String>,
}

impl Practitioner {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    /// True when at least one specialty appears in `wanted`.
    pub fn has_any_specialty(&self, wanted: &[String]) -> bool {
        self.specialties.iter().any(|s| wanted.contains(s))
    }

    /// Case-insensitive substring match against the name.
    /// `needle_lower` must already be lowercased.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, name: &str) -> Practitioner {
    Practitioner {
        id: id.into(),
        name: name.into(),
        specialties: Vec::new(),
        experience_years: 0,
        fee: 0,
        consultation_modes: Vec::new(),
        rating: DEFAULT_RATING,
        location: UNKNOWN_LOCATION.into(),
        picture: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case() {
        let p = sample("1", "Dr. Subramanium");
        assert!(p.name_contains("ram"));
        assert!(p.name_contains("dr. sub"));
        assert!(!p.name_contains("anita"));
    }

    #[test]
    fn specialty_intersection() {
        let mut p = sample("1", "Dr. A");
        p.specialties = vec!["Dentist".into(), "Dermatologist".into()];
        assert!(p.has_any_specialty(&["Dermatologist".into(), "ENT".into()]));
        assert!(!p.has_any_specialty(&["ENT".into()]));
        assert!(!p.has_any_specialty(&[]));
    }

    #[test]
    fn serializes_snake_case_with_mode_strings() {
        let mut p = sample("7", "Dr. B");
        p.consultation_modes = vec![ConsultationMode::VideoConsult];
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["experience_years"], 0);
        assert_eq!(json["consultation_modes"][0], "Video Consult");
        assert!(json["picture"].is_null());
    }
}
