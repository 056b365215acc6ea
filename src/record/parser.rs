//! Parse raw JSON payloads into records.

use super::schema::{FieldValue, Record};
use crate::utils::error::ParseError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How field values are normalized when records are ingested.
///
/// The aggregator compares values exactly; any coercion happens here,
/// once, before records reach it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Keep values verbatim
    #[default]
    Exact,

    /// Convert canonical integer strings (`"30"`, `"-4"`) to numbers
    NumericStrings,
}

/// Parse a payload from a JSON string
pub fn parse_payload_str(raw: &str) -> Result<Vec<Record>, ParseError> {
    let value: Value = serde_json::from_str(raw)?;
    parse_payload(&value)
}

/// Parse a payload in either the `{"data": [...]}` envelope or as a bare array
///
/// # Errors
/// * `ParseError::InvalidFormat` - payload is not an array/envelope, an entry
///   is not an object, or a field holds a nested array/object
pub fn parse_payload(payload: &Value) -> Result<Vec<Record>, ParseError> {
    let entries = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => {
                debug!("Payload data is null, treating as empty");
                return Ok(Vec::new());
            }
            Some(_) => {
                return Err(ParseError::InvalidFormat(
                    "'data' field is not an array".to_string(),
                ))
            }
            None => {
                return Err(ParseError::InvalidFormat(
                    "object payload has no 'data' field".to_string(),
                ))
            }
        },
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(ParseError::InvalidFormat(
                "expected an array of records".to_string(),
            ))
        }
    };

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_record(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Parsed {} records", records.len());
    Ok(records)
}

fn parse_record(index: usize, entry: &Value) -> Result<Record, ParseError> {
    let map = entry.as_object().ok_or_else(|| {
        ParseError::InvalidFormat(format!("record {} is not an object", index))
    })?;

    let mut record = Record::new();
    for (key, raw) in map {
        let value = FieldValue::from_json(raw).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "record {} field '{}' is not a scalar value",
                index, key
            ))
        })?;
        record.insert(key, value);
    }
    Ok(record)
}

/// Apply a normalization policy in place
pub fn normalize_records(records: &mut [Record], policy: Normalization) {
    if policy == Normalization::Exact {
        return;
    }

    let mut converted = 0usize;
    for record in records.iter_mut() {
        for value in record.fields_mut() {
            if let Some(number) = value.as_str().and_then(canonical_integer) {
                *value = FieldValue::Number(number);
                converted += 1;
            }
        }
    }
    debug!("Normalized {} numeric string values", converted);
}

/// `Some` only for strings that print back identically as an integer
fn canonical_integer(s: &str) -> Option<serde_json::Number> {
    if let Ok(n) = s.parse::<u64>() {
        return (n.to_string() == s).then(|| n.into());
    }
    if let Ok(n) = s.parse::<i64>() {
        return (n.to_string() == s).then(|| n.into());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_envelope() {
        let payload = json!({
            "data": [
                {"username": "asha", "zone": "A", "sdk_int": 28},
                {"username": "ben", "zone": null}
            ]
        });
        let records = parse_payload(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("sdk_int"), &FieldValue::from(28i64));
        assert!(records[1].get("zone").is_null());
    }

    #[test]
    fn test_parse_bare_array() {
        let records = parse_payload_str(r#"[{"zone": "B"}]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_rejects_nested_values() {
        let payload = json!([{"zone": {"name": "A"}}]);
        assert!(matches!(
            parse_payload(&payload),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_non_object_record() {
        let payload = json!({"data": [1, 2]});
        assert!(parse_payload(&payload).is_err());
    }

    #[test]
    fn test_canonical_integer() {
        assert!(canonical_integer("30").is_some());
        assert!(canonical_integer("-4").is_some());
        assert!(canonical_integer("030").is_none());
        assert!(canonical_integer(" 30").is_none());
        assert!(canonical_integer("+30").is_none());
        assert!(canonical_integer("3.0").is_none());
        assert!(canonical_integer("-0").is_none());
    }

    #[test]
    fn test_normalize_numeric_strings() {
        let mut records = vec![Record::new().with("sdk_int", "30").with("zone", "A")];
        normalize_records(&mut records, Normalization::NumericStrings);
        assert_eq!(records[0].get("sdk_int"), &FieldValue::from(30i64));
        assert_eq!(records[0].get("zone"), &FieldValue::from("A"));
    }

    #[test]
    fn test_exact_leaves_strings() {
        let mut records = vec![Record::new().with("sdk_int", "30")];
        normalize_records(&mut records, Normalization::Exact);
        assert_eq!(records[0].get("sdk_int"), &FieldValue::from("30"));
    }
}
