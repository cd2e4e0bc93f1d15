//! Direct-key access helpers over the raw world-state document.
//!
//! The feed is consumed as an untyped `serde_json::Value` tree; each
//! extractor reads exactly the keys it needs. A missing key or a value
//! of the wrong JSON type aborts the whole operation, matching the
//! feed's "all or nothing" consumption model.

use orbiter_core::types::EpochSeconds;
use serde_json::Value;

use crate::error::WorldStateError;

/// Fetch `value[key]`, failing with [`WorldStateError::MissingKey`].
pub fn get<'a>(value: &'a Value, key: &str) -> Result<&'a Value, WorldStateError> {
    value.get(key).ok_or_else(|| WorldStateError::missing_key(key))
}

/// Fetch the first element of the array at `value[key]`.
///
/// The trader and sortie collections always carry exactly one active
/// record; an empty collection is a shape error.
pub fn first<'a>(value: &'a Value, key: &str) -> Result<&'a Value, WorldStateError> {
    get(value, key)?
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| WorldStateError::shape(format!("{key}[0]")))
}

/// Fetch `value[key]` as a string slice.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Result<&'a str, WorldStateError> {
    get(value, key)?
        .as_str()
        .ok_or_else(|| WorldStateError::shape(format!("{key} (expected string)")))
}

/// Fetch `value[key]` as an owned array of elements.
pub fn array_field(value: &Value, key: &str) -> Result<Vec<Value>, WorldStateError> {
    get(value, key)?
        .as_array()
        .cloned()
        .ok_or_else(|| WorldStateError::shape(format!("{key} (expected array)")))
}

/// Extract a millisecond timestamp wrapper as whole epoch seconds.
///
/// The feed encodes timestamps as `{"$date": {"$numberLong": "<ms>"}}`
/// where `<ms>` is a numeric string (a plain JSON integer is also
/// accepted). The value is floor-divided by 1000. Pure, no side
/// effects.
pub fn timestamp(wrapper: &Value) -> Result<EpochSeconds, WorldStateError> {
    let raw = get(get(wrapper, "$date")?, "$numberLong")?;
    let millis = match raw {
        Value::String(text) => text
            .parse::<i64>()
            .map_err(|_| WorldStateError::shape("$numberLong (expected integer string)"))?,
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| WorldStateError::shape("$numberLong (expected integer)"))?,
        _ => return Err(WorldStateError::shape("$numberLong (expected integer)")),
    };
    Ok(millis.div_euclid(1000))
}

/// Replace the timestamp wrapper at `record[key]` with its value in
/// whole seconds.
pub fn normalize_timestamp(record: &mut Value, key: &str) -> Result<(), WorldStateError> {
    let seconds = timestamp(get(record, key)?)?;
    let map = record
        .as_object_mut()
        .ok_or_else(|| WorldStateError::shape("record (expected object)"))?;
    map.insert(key.to_string(), Value::from(seconds));
    Ok(())
}

/// Remove `record[key]`, failing if the key is absent.
pub fn remove_key(record: &mut Value, key: &str) -> Result<Value, WorldStateError> {
    record
        .as_object_mut()
        .ok_or_else(|| WorldStateError::shape("record (expected object)"))?
        .remove(key)
        .ok_or_else(|| WorldStateError::missing_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn wrapper(millis: &str) -> Value {
        json!({"$date": {"$numberLong": millis}})
    }

    // -- timestamp --

    #[test]
    fn timestamp_floor_divides_milliseconds_by_1000() {
        assert_eq!(timestamp(&wrapper("1693526400000")).unwrap(), 1_693_526_400);
        assert_eq!(timestamp(&wrapper("1999")).unwrap(), 1);
        assert_eq!(timestamp(&wrapper("999")).unwrap(), 0);
    }

    #[test]
    fn timestamp_handles_zero() {
        assert_eq!(timestamp(&wrapper("0")).unwrap(), 0);
    }

    #[test]
    fn timestamp_accepts_plain_integer_form() {
        let value = json!({"$date": {"$numberLong": 1693526400000_i64}});
        assert_eq!(timestamp(&value).unwrap(), 1_693_526_400);
    }

    #[test]
    fn timestamp_rejects_non_numeric_string() {
        assert_matches!(
            timestamp(&wrapper("soon")),
            Err(WorldStateError::Shape { .. })
        );
    }

    #[test]
    fn timestamp_requires_the_wrapper_keys() {
        assert_matches!(
            timestamp(&json!({"$date": {}})),
            Err(WorldStateError::MissingKey { key }) if key == "$numberLong"
        );
        assert_matches!(
            timestamp(&json!({})),
            Err(WorldStateError::MissingKey { key }) if key == "$date"
        );
    }

    // -- key access --

    #[test]
    fn get_reports_the_missing_key_by_name() {
        let doc = json!({"VoidTraders": []});
        assert_matches!(
            get(&doc, "Sorties"),
            Err(WorldStateError::MissingKey { key }) if key == "Sorties"
        );
    }

    #[test]
    fn first_fails_on_empty_collection() {
        let doc = json!({"VoidTraders": []});
        assert_matches!(first(&doc, "VoidTraders"), Err(WorldStateError::Shape { .. }));
    }

    #[test]
    fn normalize_timestamp_rewrites_in_place() {
        let mut record = json!({"Activation": {"$date": {"$numberLong": "5000"}}});
        normalize_timestamp(&mut record, "Activation").unwrap();
        assert_eq!(record["Activation"], 5);
    }

    #[test]
    fn remove_key_is_strict() {
        let mut record = json!({"_id": {"$oid": "abc"}});
        remove_key(&mut record, "_id").unwrap();
        assert_matches!(
            remove_key(&mut record, "_id"),
            Err(WorldStateError::MissingKey { .. })
        );
    }
}
