//! Tolerant field readers for the build export.
//!
//! Pathbuilder exports are loosely shaped: numbers sometimes arrive as strings,
//! lists as `null`, and older exports omit whole sections. Every reader here
//! resolves a missing or mistyped value to a default instead of failing, so a
//! [`Build`](crate::Build) can always be produced from any JSON object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Largest magnitude any integer field is read as.
pub const MAX_MAGNITUDE: i64 = 1_000_000;

/// Highest character level accepted from an export.
pub const MAX_LEVEL: i64 = 99;

/// Highest ability score accepted from an export.
pub const MAX_SCORE: i64 = 99;

fn from_float(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    Some(f.trunc().clamp(-(MAX_MAGNITUDE as f64), MAX_MAGNITUDE as f64) as i64)
}

/// Interpret a JSON value as an integer.
///
/// Floats are truncated toward zero and numeric strings are parsed. Results
/// are clamped to `±MAX_MAGNITUDE`; infinities and NaN are absent.
pub fn as_int(value: &Value) -> Option<i64> {
    let raw = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    raw.map(|i| i.clamp(-MAX_MAGNITUDE, MAX_MAGNITUDE))
}

/// Interpret a JSON value as text. Numbers are rendered, everything else is absent.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer field defaulting to 0.
pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_int(&value).unwrap_or(0))
}

/// Character level, defaulting to 1 and capped at [`MAX_LEVEL`].
pub fn level<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_int(&value)
        .filter(|l| *l > 0)
        .map_or(1, |l| l.min(MAX_LEVEL)))
}

/// Ability score, defaulting to 10 and kept within `0..=MAX_SCORE`.
pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_int(&value).map_or(10, |s| s.clamp(0, MAX_SCORE)))
}

/// Integer that stays absent when missing or unparseable.
pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_int(&value))
}

/// Text field defaulting to the empty string.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_text(&value).unwrap_or_default())
}

/// Boolean that stays absent unless the export states it.
pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// List of strings; non-text elements are dropped.
pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        _ => Vec::new(),
    })
}

/// List of integers; unparseable elements become 0 so positions are kept.
pub fn int_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(|v| as_int(v).unwrap_or(0)).collect(),
        _ => Vec::new(),
    })
}

/// List of records; elements that cannot be read are skipped.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// String-keyed map of records; entries that cannot be read are skipped.
pub fn map<'de, D, T>(d: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(key, item)| serde_json::from_value(item).ok().map(|v| (key, v)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// String-keyed map of integer ranks.
pub fn int_map<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, i64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(key, item)| as_int(item).map(|rank| (key.clone(), rank)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Nested record that falls back to its `Default` when the value is not an object.
pub fn record<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
