//! Versioned JSON encoding of stored values.
//!
//! Every value is written inside an envelope:
//!
//! ```text
//! {
//!   "schemaVersion": 1,
//!   "data": <value>
//! }
//! ```
//!
//! Values written before the envelope existed are bare JSON documents and
//! are still accepted on read.

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::store::KeyValueStore;

/// Current schema version.
///
/// Increment this when making breaking changes to the stored shapes.
/// Readers reject envelopes with version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const VERSION_FIELD: &str = "schemaVersion";
const DATA_FIELD: &str = "data";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    schema_version: u32,
    data: &'a T,
}

/// Serialize `value` inside a versioned envelope.
pub fn encode_value<T: Serialize>(key: &str, value: &T) -> Result<String> {
    let envelope = Envelope {
        schema_version: CURRENT_SCHEMA_VERSION,
        data: value,
    };
    serde_json::to_string(&envelope).map_err(|source| PersistenceError::Serialization {
        key: key.to_string(),
        source,
    })
}

/// Parse a stored value, unwrapping the envelope when present.
pub fn decode_value<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    let deserialization = |source| PersistenceError::Deserialization {
        key: key.to_string(),
        source,
    };

    let payload = match serde_json::from_str::<Value>(raw).map_err(deserialization)? {
        Value::Object(mut map) if map.contains_key(VERSION_FIELD) => {
            let found = map
                .get(VERSION_FIELD)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    deserialization(serde_json::Error::custom(
                        "schemaVersion must be a non-negative integer",
                    ))
                })?;
            if found > CURRENT_SCHEMA_VERSION {
                return Err(PersistenceError::UnsupportedVersion {
                    key: key.to_string(),
                    found,
                    max_supported: CURRENT_SCHEMA_VERSION,
                });
            }
            map.remove(DATA_FIELD).unwrap_or(Value::Null)
        }
        bare => bare,
    };

    serde_json::from_value(payload).map_err(deserialization)
}

/// Load and decode the value under `key`.
///
/// Returns `Ok(None)` when nothing (or only whitespace) was stored.
pub fn load_value<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => decode_value(key, &raw).map(Some),
        _ => Ok(None),
    }
}

/// Encode `value` and replace whatever is stored under `key`.
pub fn save_value<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = encode_value(key, value)?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_encode_wraps_value() {
        let encoded = encode_value("catalog_boats", &vec!["Marlin"]).unwrap();
        assert_eq!(encoded, r#"{"schemaVersion":1,"data":["Marlin"]}"#);
    }

    #[test]
    fn test_decode_envelope_and_bare_values() {
        let wrapped: Vec<String> =
            decode_value("k", r#"{"schemaVersion":1,"data":["Bow"]}"#).unwrap();
        let bare: Vec<String> = decode_value("k", r#"["Bow"]"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let result = decode_value::<Vec<String>>("k", r#"{"schemaVersion":7,"data":[]}"#);
        assert!(matches!(
            result,
            Err(PersistenceError::UnsupportedVersion {
                found: 7,
                max_supported: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_version() {
        let result = decode_value::<Vec<String>>("k", r#"{"schemaVersion":"one","data":[]}"#);
        assert!(matches!(
            result,
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_decode_malformed_json() {
        let result = decode_value::<Vec<String>>("reports", "[{not json");
        assert!(matches!(
            result,
            Err(PersistenceError::Deserialization { ref key, .. }) if key == "reports"
        ));
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_value::<Vec<String>, _>(&store, "k").unwrap(), None);

        save_value(&mut store, "k", &vec!["Flare".to_string()]).unwrap();
        let loaded: Option<Vec<String>> = load_value(&store, "k").unwrap();
        assert_eq!(loaded, Some(vec!["Flare".to_string()]));
    }

    #[test]
    fn test_load_blank_value_is_absent() {
        let store = MemoryStore::new().with_value("k", "  ");
        assert_eq!(load_value::<Vec<String>, _>(&store, "k").unwrap(), None);
    }
}
