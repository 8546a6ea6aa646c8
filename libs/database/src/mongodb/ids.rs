//! UUID document keys
//!
//! The driver's raw serializer writes a [`Uuid`] as binary while `to_bson`
//! writes it as a string, so filters built one way never match documents
//! written the other. Ids are therefore always stored as hyphenated strings.

use mongodb::bson::{Document, doc};
use serde::{Deserialize, Deserializer, Serializer, de::Error};
use uuid::Uuid;

/// `{ "_id": "<uuid>" }`
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// Serde adapter for `#[serde(with = "database::mongodb::ids::uuid_as_string")]`
pub mod uuid_as_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Keyed {
        #[serde(rename = "_id", with = "uuid_as_string")]
        id: Uuid,
    }

    #[test]
    fn test_raw_and_document_encodings_agree() {
        let keyed = Keyed { id: Uuid::now_v7() };

        let raw = bson::to_raw_document_buf(&keyed).unwrap();
        let doc = bson::to_document(&keyed).unwrap();

        assert_eq!(raw.get_str("_id").unwrap(), keyed.id.to_string());
        assert_eq!(doc, id_filter(keyed.id));
    }

    #[test]
    fn test_json_round_trip_and_rejection() {
        let keyed = Keyed { id: Uuid::now_v7() };
        let json = serde_json::to_string(&keyed).unwrap();
        assert_eq!(serde_json::from_str::<Keyed>(&json).unwrap(), keyed);

        assert!(serde_json::from_str::<Keyed>(r#"{"_id":"nope"}"#).is_err());
    }
}
