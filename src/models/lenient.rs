//! Field deserializers tolerant of the two backends' representations.
//!
//! The document store hands out string ids and `{ _seconds, _nanoseconds }`
//! timestamps; the SQL backend hands out integer ids and ISO strings.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Record id held as a string whatever its wire form
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Optional scalar held as a string (`kabatNumber` is sometimes numeric)
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// List of ids; a single scalar becomes a one-element list
pub fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    fn scalar(v: Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values.into_iter().filter_map(scalar).collect(),
        Some(v) => scalar(v).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Optional integer that may arrive quoted
pub fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `340.0` is accepted as 340; fractional or out-of-range values are not
fn whole_number(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Optional timestamp from an RFC 3339 string, epoch milliseconds or a
/// document-store timestamp object. Anything else is dropped.
pub fn opt_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| parse_timestamp(&v)))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::Object(map) => {
            let seconds = map
                .get("_seconds")
                .or_else(|| map.get("seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("_nanoseconds")
                .or_else(|| map.get("nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos as u32).single()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(serde::Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "opt_i64")]
        pages: Option<i64>,
    }

    fn pages(value: Value) -> Option<i64> {
        serde_json::from_value::<Counted>(json!({ "pages": value })).unwrap().pages
    }

    #[test]
    fn test_opt_i64_rejects_fractions() {
        assert_eq!(pages(json!(340)), Some(340));
        assert_eq!(pages(json!(340.0)), Some(340));
        assert_eq!(pages(json!(" 212 ")), Some(212));
        assert_eq!(pages(json!(340.7)), None);
        assert_eq!(pages(json!("340.7")), None);
        assert_eq!(pages(json!(1e30)), None);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let iso = parse_timestamp(&json!("2024-03-01T10:00:00Z")).unwrap();
        let millis = parse_timestamp(&json!(1709287200000_i64)).unwrap();
        let store = parse_timestamp(&json!({"_seconds": 1709287200, "_nanoseconds": 0})).unwrap();

        assert_eq!(iso, millis);
        assert_eq!(iso, store);
        assert!(parse_timestamp(&json!("yesterday")).is_none());
        assert!(parse_timestamp(&json!(true)).is_none());
    }
}
