//! Lenient deserializers for request and journal fields.
//!
//! Clients send `null` for fields they do not know and are loose about
//! scalar types. These helpers map such values to the field's default
//! instead of rejecting the whole body. Use them with
//! `#[serde(default, deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// `null` reads as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A JSON object; `null` or any non-object value reads as empty.
pub fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    })
}

/// Text from a string or scalar; `null`, arrays and objects read as empty.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(scalar_text)
        .unwrap_or_default())
}

/// Optional text from a string or scalar. Blank text reads as `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(scalar_text)
        .filter(|s| !s.trim().is_empty()))
}

/// A list of strings. A bare string is a one-element list, scalar elements
/// are rendered as text, and `null` or nested values are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(other) => scalar_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// A gestation week from a number or numeric string. Anything else is `None`.
pub fn optional_week<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(week_from_value))
}

/// Interpret a JSON value as a week number.
pub fn week_from_value(value: &Value) -> Option<u32> {
    let week = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(week).ok()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        count: u32,
        #[serde(deserialize_with = "object_or_empty")]
        profile: Map<String, Value>,
        #[serde(deserialize_with = "text_or_empty")]
        name: String,
        #[serde(deserialize_with = "optional_text")]
        language: Option<String>,
        #[serde(deserialize_with = "string_list")]
        tags: Vec<String>,
        #[serde(deserialize_with = "optional_week")]
        week: Option<u32>,
    }

    fn sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_nulls_read_as_defaults() {
        let s = sample(json!({
            "count": null, "profile": null, "name": null,
            "language": null, "tags": null, "week": null
        }));
        assert_eq!(s.count, 0);
        assert!(s.profile.is_empty());
        assert_eq!(s.name, "");
        assert!(s.language.is_none());
        assert!(s.tags.is_empty());
        assert!(s.week.is_none());
    }

    #[test]
    fn test_mistyped_scalars_are_coerced() {
        let s = sample(json!({
            "profile": [1, 2],
            "name": 42,
            "language": "  ",
            "tags": ["nausea", 3, null, {"x": 1}, true],
            "week": "24"
        }));
        assert!(s.profile.is_empty());
        assert_eq!(s.name, "42");
        assert!(s.language.is_none());
        assert_eq!(s.tags, vec!["nausea", "3", "true"]);
        assert_eq!(s.week, Some(24));

        assert_eq!(sample(json!({"tags": "back pain"})).tags, vec!["back pain"]);
    }

    #[test]
    fn test_week_from_value() {
        assert_eq!(week_from_value(&json!(30)), Some(30));
        assert_eq!(week_from_value(&json!(12.0)), Some(12));
        assert_eq!(week_from_value(&json!(12.5)), None);
        assert_eq!(week_from_value(&json!(-3)), None);
        assert_eq!(week_from_value(&json!("week 5")), None);
        assert_eq!(week_from_value(&json!(true)), None);
    }
}
