use serde::Deserialize;
use serde_json::Value;

static NULL: Value = Value::Null;

/// One element of the remote feed, before normalization.
///
/// Every field is kept as a raw JSON value so that a malformed field never
/// fails deserialization of the whole record. Missing fields are `Null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Value,
    pub name: Value,
    pub specialities: Value,
    pub experience: Value,
    pub fees: Value,
    pub video_consult: Value,
    pub in_clinic: Value,
    pub clinic: Value,
    pub photo: Value,
}

impl RawRecord {
    /// Non-object values (numbers, strings, nulls) become an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// `clinic.address.city`, if present at all.
    pub fn city(&self) -> &Value {
        self.clinic
            .get("address")
            .and_then(|address| address.get("city"))
            .unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_are_null() {
        let raw = RawRecord::from_value(json!({ "name": "Dr. X" }));
        assert_eq!(raw.name, json!("Dr. X"));
        assert!(raw.fees.is_null());
        assert!(raw.city().is_null());
    }

    #[test]
    fn non_object_becomes_empty_record() {
        let raw = RawRecord::from_value(json!(42));
        assert!(raw.id.is_null());
        assert!(raw.name.is_null());
    }

    #[test]
    fn city_is_read_from_nested_address() {
        let raw = RawRecord::from_value(json!({
            "clinic": { "name": "Care Clinic", "address": { "city": "Chennai" } }
        }));
        assert_eq!(raw.city(), &json!("Chennai"));
    }

    #[test]
    fn city_tolerates_wrong_shapes() {
        let raw = RawRecord::from_value(json!({ "clinic": "downtown" }));
        assert!(raw.city().is_null());
        let raw = RawRecord::from_value(json!({ "clinic": { "address": [1, 2] } }));
        assert!(raw.city().is_null());
    }
}
