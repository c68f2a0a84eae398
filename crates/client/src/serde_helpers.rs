//! Serde helpers for Splunk's loosely typed entry content.
//!
//! Responsibilities:
//! - Accept numbers and booleans that arrive as strings (every leaf of an
//!   Atom `<s:dict>` is text).
//! - Treat an empty text value as an absent optional structure.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//!
//! Invariants / assumptions:
//! - Booleans are `0`/`1` or `true`/`false` in any case.
//! - These helpers must not log or print values; errors are generic parse errors.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum F64OrString {
    F64(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    U64(u64),
    String(String),
}

fn parse_bool<E: serde::de::Error>(raw: &str) -> Result<bool, E> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "" => Ok(false),
        other => Err(E::custom(format!("invalid boolean '{other}'"))),
    }
}

pub fn splunk_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::U64(n) => Ok(n != 0),
        BoolOrString::String(s) => parse_bool(&s),
    }
}

pub fn opt_splunk_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::U64(n)) => Ok(Some(n != 0)),
        Some(BoolOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(BoolOrString::String(s)) => parse_bool(&s).map(Some),
    }
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<U64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(U64OrString::U64(v)) => Ok(Some(v)),
        Some(U64OrString::I64(v)) => u64::try_from(v).map(Some).map_err(D::Error::custom),
        Some(U64OrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(U64OrString::String(s)) => s.trim().parse::<u64>().map(Some).map_err(D::Error::custom),
    }
}

pub fn opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<F64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(F64OrString::F64(v)) => Ok(Some(v)),
        Some(F64OrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(F64OrString::String(s)) => s.trim().parse::<f64>().map(Some).map_err(D::Error::custom),
    }
}

/// `""` and missing both become `None`; anything else deserializes as `T`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
    }
}
