//! Primitive field checks shared by every definition table.
//!
//! Each helper takes the raw JSON value and a human-readable context
//! (`weapon 'iron_sword' attack`) and fails with a validation error naming it.
//! Booleans are never accepted where a number is expected, and integer checks
//! reject every float, including integral ones such as `5.0`.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{ContentError, Result};

pub fn require_mapping<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ContentError::validation(context, "must be an object"))
}

/// Checks that `map` holds every `required` key and nothing outside
/// `required` and `optional`. All violations are reported at once, sorted.
pub fn assert_exact_fields(
    map: &Map<String, Value>,
    context: &str,
    required: &[&str],
    optional: &[&str],
) -> Result<()> {
    let mut missing: Vec<String> = required
        .iter()
        .filter(|name| !map.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    let mut unknown: Vec<String> = map
        .keys()
        .filter(|key| !required.contains(&key.as_str()) && !optional.contains(&key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unknown.is_empty() {
        return Ok(());
    }
    missing.sort();
    unknown.sort();
    Err(ContentError::Schema {
        context: context.to_string(),
        missing,
        unknown,
    })
}

pub fn require_str<'a>(value: &'a Value, context: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ContentError::validation(context, "must be a string"))
}

/// A string that is not blank once trimmed. Returns the text as written.
pub fn require_non_empty_str<'a>(value: &'a Value, context: &str) -> Result<&'a str> {
    let text = require_str(value, context)?;
    if text.trim().is_empty() {
        return Err(ContentError::validation(context, "must not be empty"));
    }
    Ok(text)
}

pub fn require_int(value: &Value, context: &str) -> Result<i64> {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => number
            .as_i64()
            .ok_or_else(|| ContentError::validation(context, "is out of range")),
        _ => Err(ContentError::validation(context, "must be an integer")),
    }
}

/// A non-negative integer that fits in `u32`.
pub fn require_u32(value: &Value, context: &str) -> Result<u32> {
    let int = require_int(value, context)?;
    if int < 0 {
        return Err(ContentError::validation(context, "must be non-negative"));
    }
    u32::try_from(int).map_err(|_| ContentError::validation(context, "is out of range"))
}

pub fn require_positive(value: &Value, context: &str) -> Result<u32> {
    match require_u32(value, context)? {
        0 => Err(ContentError::validation(context, "must be positive")),
        n => Ok(n),
    }
}

pub fn require_i32(value: &Value, context: &str) -> Result<i32> {
    let int = require_int(value, context)?;
    i32::try_from(int).map_err(|_| ContentError::validation(context, "is out of range"))
}

pub fn require_bool(value: &Value, context: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ContentError::validation(context, "must be a boolean"))
}

/// Any JSON number, integer or float.
pub fn require_number(value: &Value, context: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ContentError::validation(context, "must be a number"))
}

pub fn require_non_negative_number(value: &Value, context: &str) -> Result<f64> {
    let number = require_number(value, context)?;
    if number < 0.0 {
        return Err(ContentError::validation(context, "must be non-negative"));
    }
    Ok(number)
}

pub fn require_list<'a>(value: &'a Value, context: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ContentError::validation(context, "must be a list"))
}

/// A list of strings. An absent or `null` value yields an empty list.
pub fn require_str_list(value: Option<&Value>, context: &str) -> Result<Vec<String>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    require_list(value, context)?
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ContentError::validation(context, "entries must be strings"))
        })
        .collect()
}

/// World tags: at least one, all lowercase.
pub fn require_tag_set(tags: &[String], context: &str) -> Result<()> {
    if tags.is_empty() {
        return Err(ContentError::validation(context, "must list at least one tag"));
    }
    if let Some(tag) = tags.iter().find(|tag| tag.to_lowercase() != **tag) {
        return Err(ContentError::validation(
            context,
            format!("must be lowercase, got '{tag}'"),
        ));
    }
    Ok(())
}

/// A string drawn from `names`, parsed into its enum.
pub fn require_one_of<T: FromStr>(value: &Value, context: &str, names: &[&str]) -> Result<T> {
    let text = require_str(value, context)?;
    text.parse()
        .map_err(|_| ContentError::validation(context, format!("must be one of {names:?}, got '{text}'")))
}
