//! Timestamps
//!
//! Documents hold instants as BSON datetimes so a sort on `createdAt` is
//! chronological. RFC 3339 strings with varying fractional digits do not sort
//! that way (`...00.5Z` orders before `...00Z`). JSON keeps the RFC 3339 form.
//!
//! The driver encodes and decodes through bson's raw (non human-readable)
//! serializer; that is the path that gets the BSON datetime.

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{self, Bson};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

/// BSON datetime for hand-built update documents
pub fn bson_datetime(at: DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(at.timestamp_millis()))
}

/// Serde adapter for `#[serde(with = "database::mongodb::dates::datetime_as_bson")]`
///
/// Stored values are millisecond precision. Documents written before the
/// switch still carry a string and are parsed as RFC 3339.
pub mod datetime_as_bson {
    use super::*;

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            at.serialize(serializer)
        } else {
            bson::DateTime::from_millis(at.timestamp_millis()).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        if deserializer.is_human_readable() {
            return DateTime::<Utc>::deserialize(deserializer);
        }

        match Bson::deserialize(deserializer)? {
            Bson::DateTime(at) => Utc
                .timestamp_millis_opt(at.timestamp_millis())
                .single()
                .ok_or_else(|| D::Error::custom("datetime out of range")),
            Bson::String(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a datetime, found {:?}",
                other.element_type()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    struct Stamped {
        #[serde(with = "datetime_as_bson")]
        created_at: DateTime<Utc>,
    }

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_driver_encoding_is_bson_datetime() {
        let stamped = Stamped {
            created_at: at("2024-05-01T10:00:00.250Z"),
        };

        let raw = bson::to_raw_document_buf(&stamped).unwrap();
        let stored = raw.get_datetime("createdAt").unwrap();
        assert_eq!(stored.timestamp_millis(), stamped.created_at.timestamp_millis());

        let back: Stamped = bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back, stamped);
    }

    #[test]
    fn test_stored_values_sort_chronologically() {
        let whole = at("2024-05-01T10:00:00Z");
        let later = at("2024-05-01T10:00:00.500Z");

        // The serialized string forms order the wrong way round.
        let text = |at: DateTime<Utc>| serde_json::to_string(&at).unwrap();
        assert!(text(later) < text(whole));

        let encode = |created_at| {
            let raw = bson::to_raw_document_buf(&Stamped { created_at }).unwrap();
            raw.get_datetime("createdAt").unwrap()
        };
        assert!(encode(later) > encode(whole));
    }

    #[test]
    fn test_legacy_string_is_still_read() {
        let raw = bson::to_raw_document_buf(&doc! { "createdAt": "2024-05-01T10:00:00Z" }).unwrap();
        let back: Stamped = bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back.created_at, at("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn test_json_keeps_rfc3339_string() {
        let stamped = Stamped {
            created_at: at("2024-05-01T10:00:00Z"),
        };
        let json = serde_json::to_value(&stamped).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(serde_json::from_value::<Stamped>(json).unwrap(), stamped);
    }

    #[test]
    fn test_bson_datetime_helper() {
        let when = at("2024-05-01T10:00:00.125Z");
        match bson_datetime(when) {
            Bson::DateTime(stored) => assert_eq!(stored.timestamp_millis(), when.timestamp_millis()),
            other => panic!("expected datetime, got {:?}", other),
        }
    }
}
