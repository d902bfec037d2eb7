//! Storage normalization for date-bearing documents.
//!
//! BSON has no calendar-date scalar, and the store keeps full timestamps as
//! ISO-8601 strings rather than native BSON datetimes. [`to_storage`] and
//! [`from_storage`] convert between the two shapes at the repository boundary;
//! [`iso_datetime`] is the matching serde representation for entity timestamp
//! fields.

use bson::{Bson, Document};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Classification of a string field read back from storage. Calendar dates
/// stay in their stored string form, so the variant carries no payload.
enum StoredValue {
    Timestamp(DateTime<Utc>),
    Date,
    Text,
}

/// Normalize a document before it is written to the store.
///
/// Native BSON datetime values become ISO-8601 timestamp strings with an
/// explicit UTC offset. Calendar dates are already serialized as `YYYY-MM-DD`
/// strings by the model layer and pass through untouched, as does everything
/// else. Recurses into nested documents field by field; arrays are left alone.
/// Idempotent.
pub fn to_storage(doc: &mut Document) {
    let keys: Vec<String> = doc.keys().cloned().collect();
    for key in keys {
        let Some(value) = doc.get_mut(&key) else {
            continue;
        };
        match value {
            Bson::DateTime(dt) => {
                *value = Bson::String(format_timestamp(&dt.to_chrono()));
            }
            Bson::Document(nested) => to_storage(nested),
            _ => {}
        }
    }
}

/// Restore a document read from the store.
///
/// Every string field is classified best-effort: timestamp-shaped strings
/// become native BSON datetimes; 10-character two-hyphen strings are validated
/// as calendar dates and stay in their canonical string form (BSON has no
/// date-only scalar); anything unparseable is left untouched. Recurses into
/// nested documents, not into arrays. Idempotent.
pub fn from_storage(doc: &mut Document) {
    let keys: Vec<String> = doc.keys().cloned().collect();
    for key in keys {
        let Some(value) = doc.get_mut(&key) else {
            continue;
        };
        match value {
            Bson::String(s) => match classify(s) {
                StoredValue::Timestamp(ts) => *value = Bson::DateTime(ts.into()),
                StoredValue::Date | StoredValue::Text => {}
            },
            Bson::Document(nested) => from_storage(nested),
            _ => {}
        }
    }
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// A timestamp string has a `T` separator and ends with `Z` or carries a
/// `+HH:MM`/`-HH:MM`-style offset in its last six characters.
fn looks_like_timestamp(s: &str) -> bool {
    if !s.contains('T') {
        return false;
    }
    if s.ends_with('Z') {
        return true;
    }
    // Fields may hold arbitrary free text, so inspect the tail by characters
    // rather than slicing bytes.
    s.chars().rev().take(6).any(|c| c == '+' || c == '-')
}

fn classify(s: &str) -> StoredValue {
    if looks_like_timestamp(s) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&s.replace('Z', "+00:00")) {
            return StoredValue::Timestamp(parsed.with_timezone(&Utc));
        }
        return StoredValue::Text;
    }
    if s.len() == 10 && s.matches('-').count() == 2 && s.parse::<NaiveDate>().is_ok() {
        return StoredValue::Date;
    }
    StoredValue::Text
}

/// Serde representation for entity timestamps: serializes to the ISO-8601
/// `+00:00` string used in storage and API responses, and deserializes from
/// either that string or a native BSON datetime.
pub mod iso_datetime {
    use bson::Bson;
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::String(s) => DateTime::parse_from_rfc3339(&s.replace('Z', "+00:00"))
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(de::Error::custom),
            Bson::DateTime(dt) => Ok(dt.to_chrono()),
            other => Err(de::Error::custom(format!(
                "expected datetime string, got {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_to_storage_converts_native_datetimes() {
        let mut doc = doc! { "created_at": bson::DateTime::from_millis(1_700_000_000_123) };
        to_storage(&mut doc);
        assert_eq!(
            doc.get_str("created_at").unwrap(),
            "2023-11-14T22:13:20.123000+00:00"
        );
    }

    #[test]
    fn test_round_trip_restores_native_datetimes() {
        let now = bson::DateTime::now();
        let mut doc = doc! {
            "id": "4a7f2c90-1f6b-4c52-9e1a-0d2c7b3f8e61",
            "created_at": now,
            "last_contact_date": "2024-03-15",
            "comment": "позвонить завтра",
            "debt": 150.5,
            "action_status": { "made_order": true },
        };
        let original = doc.clone();

        to_storage(&mut doc);
        assert!(matches!(doc.get("created_at"), Some(Bson::String(_))));

        from_storage(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_both_directions_are_idempotent() {
        let mut doc = doc! {
            "created_at": bson::DateTime::now(),
            "date": "2024-03-15",
        };
        to_storage(&mut doc);
        let stored = doc.clone();
        to_storage(&mut doc);
        assert_eq!(doc, stored);

        from_storage(&mut doc);
        let restored = doc.clone();
        from_storage(&mut doc);
        assert_eq!(doc, restored);
    }

    #[test]
    fn test_from_storage_parses_zulu_timestamps() {
        let mut doc = doc! { "created_at": "2024-03-15T09:30:00Z" };
        from_storage(&mut doc);
        assert_eq!(
            doc.get("created_at"),
            Some(&Bson::DateTime(bson::DateTime::from_millis(
                1_710_495_000_000
            )))
        );
    }

    #[test]
    fn test_from_storage_parses_negative_offsets() {
        let mut doc = doc! { "created_at": "2024-03-15T04:30:00-05:00" };
        from_storage(&mut doc);
        assert_eq!(
            doc.get("created_at"),
            Some(&Bson::DateTime(bson::DateTime::from_millis(
                1_710_495_000_000
            )))
        );
    }

    #[test]
    fn test_date_strings_stay_strings() {
        let mut doc = doc! { "date": "2024-03-15" };
        from_storage(&mut doc);
        assert_eq!(doc.get_str("date").unwrap(), "2024-03-15");
    }

    #[test]
    fn test_malformed_lookalikes_are_left_alone() {
        let mut doc = doc! {
            // 10 chars, two hyphens, but not a valid date
            "comment": "2024-13-45",
            // has a T and an offset-shaped tail, but not a timestamp
            "task_description": "meeT at +1",
            // no offset, no Z
            "note": "2024-03-15T09:30:00",
        };
        let original = doc.clone();
        from_storage(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_non_ascii_text_passes_through() {
        let mut doc = doc! { "comment": "заказ → 15 комплектов" };
        let original = doc.clone();
        to_storage(&mut doc);
        from_storage(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_nested_documents_are_normalized_but_arrays_skipped() {
        let mut doc = doc! {
            "nested": { "seen_at": bson::DateTime::from_millis(0) },
            "tags": ["2024-03-15T09:30:00Z"],
        };
        to_storage(&mut doc);
        let nested = doc.get_document("nested").unwrap();
        assert_eq!(
            nested.get_str("seen_at").unwrap(),
            "1970-01-01T00:00:00.000000+00:00"
        );

        from_storage(&mut doc);
        let nested = doc.get_document("nested").unwrap();
        assert_eq!(
            nested.get("seen_at"),
            Some(&Bson::DateTime(bson::DateTime::from_millis(0)))
        );
        // Array contents are never reclassified
        let tags = doc.get_array("tags").unwrap();
        assert_eq!(tags[0], Bson::String("2024-03-15T09:30:00Z".to_string()));
    }
}
