use serde::{Deserialize, Serialize};

/// Raised when a page-state or request value names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + label + std::str::FromStr pattern.
/// The string form is also the serde form, so the page state and the JSON
/// views agree on spelling.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal, $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ConsultationMode {
    VideoConsult => "Video Consult", "Video Consult",
    InClinic => "In Clinic", "In Clinic",
});

str_enum!(SortOption {
    Fee => "fees", "Fees (Low to High)",
    Experience => "experience", "Experience (High to Low)",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consultation_mode_parses_page_state_spelling() {
        assert_eq!(
            "Video Consult".parse::<ConsultationMode>().unwrap(),
            ConsultationMode::VideoConsult
        );
        assert_eq!(
            "In Clinic".parse::<ConsultationMode>().unwrap(),
            ConsultationMode::InClinic
        );
    }

    #[test]
    fn unknown_sort_is_rejected_with_field_name() {
        let err = "rating".parse::<SortOption>().unwrap_err();
        assert_eq!(err.field, "SortOption");
        assert_eq!(err.value, "rating");
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&ConsultationMode::InClinic).unwrap();
        assert_eq!(json, "\"In Clinic\"");
        let sort: SortOption = serde_json::from_str("\"experience\"").unwrap();
        assert_eq!(sort, SortOption::Experience);
    }

    #[test]
    fn sort_labels_describe_direction() {
        assert_eq!(SortOption::Fee.label(), "Fees (Low to High)");
        assert_eq!(SortOption::Experience.label(), "Experience (High to Low)");
        assert_eq!(SortOption::ALL.len(), 2);
    }
}
