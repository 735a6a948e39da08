//! Output schema validation
//!
//! The engine's JSON output is a contract with downstream consumers, so it
//! is validated structurally before publication: exact key sets at every
//! level, canonical `YYYY-MM-DDTHH:MM` timestamps, confidences in [0,1],
//! and explanation caps. Violations are `Schema` errors naming the path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use eventsift_domain::constants::{MAX_EXPLANATION_BULLETS, MAX_EXPLANATION_LENGTH};
use eventsift_domain::{EngineOutput, EventSiftError, Result};

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$")
        .expect("DATETIME_REGEX should compile - this is a bug")
});

const GROUP_KEYS: [&str; 6] =
    ["groupId", "groupType", "groupTitle", "groupRationale", "groupConfidence", "members"];
const MEMBER_KEYS: [&str; 8] =
    ["id", "title", "start", "end", "location", "suggestionConfidence", "explanation", "source"];
const GROUP_TYPES: [&str; 4] = ["trip", "agenda", "series", "none"];

/// Validate a typed engine output.
///
/// # Errors
/// Returns a `Schema` error when the serialized form violates the output
/// contract, or an `Internal` error when serialization itself fails.
pub fn validate_output(output: &EngineOutput) -> Result<()> {
    let value = serde_json::to_value(output)
        .map_err(|e| EventSiftError::Internal(format!("output serialization failed: {e}")))?;
    validate_output_value(&value)
}

/// Validate an untyped JSON value against the output contract. Used for
/// fallback-strategy output, which arrives from outside the type system.
///
/// # Errors
/// Returns a `Schema` error naming the first violated path.
pub fn validate_output_value(value: &Value) -> Result<()> {
    let root = as_object(value, "$")?;
    require_keys(root, &["groups", "meta"], "$")?;

    let groups = root
        .get("groups")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error("$.groups", "must be an array"))?;
    for (idx, group) in groups.iter().enumerate() {
        validate_group(group, &format!("$.groups[{idx}]"))?;
    }

    validate_meta(root.get("meta").unwrap_or(&Value::Null))
}

fn validate_group(value: &Value, path: &str) -> Result<()> {
    let group = as_object(value, path)?;
    require_keys(group, &GROUP_KEYS, path)?;

    require_string(group.get("groupId"), &format!("{path}.groupId"))?;
    require_string(group.get("groupTitle"), &format!("{path}.groupTitle"))?;
    require_string(group.get("groupRationale"), &format!("{path}.groupRationale"))?;

    let group_type = require_string(group.get("groupType"), &format!("{path}.groupType"))?;
    if !GROUP_TYPES.contains(&group_type) {
        return Err(schema_error(
            &format!("{path}.groupType"),
            "must be one of trip, agenda, series, none",
        ));
    }

    require_unit_interval(group.get("groupConfidence"), &format!("{path}.groupConfidence"))?;

    let members = group
        .get("members")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error(&format!("{path}.members"), "must be an array"))?;
    if members.is_empty() {
        return Err(schema_error(&format!("{path}.members"), "must not be empty"));
    }
    for (idx, member) in members.iter().enumerate() {
        validate_member(member, &format!("{path}.members[{idx}]"))?;
    }
    Ok(())
}

fn validate_member(value: &Value, path: &str) -> Result<()> {
    let member = as_object(value, path)?;
    require_keys(member, &MEMBER_KEYS, path)?;

    require_string(member.get("id"), &format!("{path}.id"))?;
    require_string(member.get("title"), &format!("{path}.title"))?;
    require_datetime(member.get("start"), &format!("{path}.start"))?;
    require_datetime(member.get("end"), &format!("{path}.end"))?;
    require_nullable_string(member.get("location"), &format!("{path}.location"))?;
    require_unit_interval(
        member.get("suggestionConfidence"),
        &format!("{path}.suggestionConfidence"),
    )?;
    validate_explanation(
        member.get("explanation").unwrap_or(&Value::Null),
        &format!("{path}.explanation"),
    )?;
    validate_source(member.get("source").unwrap_or(&Value::Null), &format!("{path}.source"))
}

fn validate_explanation(value: &Value, path: &str) -> Result<()> {
    let explanation = as_object(value, path)?;
    require_keys(explanation, &["title", "bullets"], path)?;
    require_string(explanation.get("title"), &format!("{path}.title"))?;

    let bullets = explanation
        .get("bullets")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error(&format!("{path}.bullets"), "must be an array"))?;
    if bullets.len() > MAX_EXPLANATION_BULLETS {
        return Err(schema_error(
            &format!("{path}.bullets"),
            "must contain at most 4 entries",
        ));
    }
    for (idx, bullet) in bullets.iter().enumerate() {
        let text = require_string(Some(bullet), &format!("{path}.bullets[{idx}]"))?;
        if text.chars().count() > MAX_EXPLANATION_LENGTH {
            return Err(schema_error(
                &format!("{path}.bullets[{idx}]"),
                "exceeds the 140-character cap",
            ));
        }
    }
    Ok(())
}

fn validate_source(value: &Value, path: &str) -> Result<()> {
    let source = as_object(value, path)?;
    require_keys(source, &["documentId", "lineHints"], path)?;
    require_string(source.get("documentId"), &format!("{path}.documentId"))?;

    let hints = source
        .get("lineHints")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error(&format!("{path}.lineHints"), "must be an array"))?;
    for (idx, hint) in hints.iter().enumerate() {
        if hint.as_u64().is_none() {
            return Err(schema_error(
                &format!("{path}.lineHints[{idx}]"),
                "must be a non-negative integer",
            ));
        }
    }
    Ok(())
}

fn validate_meta(value: &Value) -> Result<()> {
    let meta = as_object(value, "$.meta")?;
    require_keys(meta, &["aiFallbackUsed", "aiFallbackReason"], "$.meta")?;
    if meta.get("aiFallbackUsed").and_then(Value::as_bool).is_none() {
        return Err(schema_error("$.meta.aiFallbackUsed", "must be a boolean"));
    }
    require_nullable_string(meta.get("aiFallbackReason"), "$.meta.aiFallbackReason")
}

// --- Primitive checks ---------------------------------------------------

fn as_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>> {
    value.as_object().ok_or_else(|| schema_error(path, "must be an object"))
}

fn require_keys(
    object: &serde_json::Map<String, Value>,
    expected: &[&str],
    path: &str,
) -> Result<()> {
    for key in expected {
        if !object.contains_key(*key) {
            return Err(schema_error(path, &format!("missing key \"{key}\"")));
        }
    }
    for key in object.keys() {
        if !expected.contains(&key.as_str()) {
            return Err(schema_error(path, &format!("unexpected key \"{key}\"")));
        }
    }
    Ok(())
}

fn require_string<'a>(value: Option<&'a Value>, path: &str) -> Result<&'a str> {
    value
        .and_then(Value::as_str)
        .ok_or_else(|| schema_error(path, "must be a string"))
}

fn require_nullable_string(value: Option<&Value>, path: &str) -> Result<()> {
    match value {
        Some(Value::Null | Value::String(_)) => Ok(()),
        _ => Err(schema_error(path, "must be a string or null")),
    }
}

fn require_datetime(value: Option<&Value>, path: &str) -> Result<()> {
    let text = require_string(value, path)?;
    if DATETIME_REGEX.is_match(text) {
        Ok(())
    } else {
        Err(schema_error(path, "must match YYYY-MM-DDTHH:MM"))
    }
}

fn require_unit_interval(value: Option<&Value>, path: &str) -> Result<()> {
    match value.and_then(Value::as_f64) {
        Some(n) if (0.0..=1.0).contains(&n) => Ok(()),
        _ => Err(schema_error(path, "must be a number in [0,1]")),
    }
}

fn schema_error(path: &str, detail: &str) -> EventSiftError {
    EventSiftError::Schema(format!("{path} {detail}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_output() -> Value {
        json!({
            "groups": [{
                "groupId": "trip-1",
                "groupType": "trip",
                "groupTitle": "Trip: ZRH",
                "groupRationale": "2 travel-related events form one journey (ZRH)",
                "groupConfidence": 0.82,
                "members": [{
                    "id": "s1",
                    "title": "Outbound flight ZRH-BER",
                    "start": "2026-03-12T08:00",
                    "end": "2026-03-12T09:30",
                    "location": "ZRH",
                    "suggestionConfidence": 0.78,
                    "explanation": {
                        "title": "Part of a detected trip itinerary",
                        "bullets": ["Title cue: \"Outbound flight ZRH-BER\""]
                    },
                    "source": { "documentId": "doc-1", "lineHints": [3] }
                }]
            }],
            "meta": { "aiFallbackUsed": false, "aiFallbackReason": null }
        })
    }

    #[test]
    fn test_valid_output_passes() {
        assert!(validate_output_value(&valid_output()).is_ok());
    }

    #[test]
    fn test_missing_key_rejected() {
        let mut output = valid_output();
        output["groups"][0].as_object_mut().unwrap().remove("groupTitle");

        let err = validate_output_value(&output).unwrap_err();
        assert!(err.to_string().contains("groupTitle"));
    }

    #[test]
    fn test_unexpected_key_rejected() {
        let mut output = valid_output();
        output["groups"][0]["extra"] = json!(true);

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_non_canonical_datetime_rejected() {
        let mut output = valid_output();
        output["groups"][0]["members"][0]["start"] = json!("2026-03-12 08:00");

        let err = validate_output_value(&output).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DDTHH:MM"));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let mut output = valid_output();
        output["groups"][0]["groupConfidence"] = json!(1.2);

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_unknown_group_type_rejected() {
        let mut output = valid_output();
        output["groups"][0]["groupType"] = json!("cluster");

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_empty_members_rejected() {
        let mut output = valid_output();
        output["groups"][0]["members"] = json!([]);

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_too_many_bullets_rejected() {
        let mut output = valid_output();
        output["groups"][0]["members"][0]["explanation"]["bullets"] =
            json!(["a", "b", "c", "d", "e"]);

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_overlong_bullet_rejected() {
        let mut output = valid_output();
        output["groups"][0]["members"][0]["explanation"]["bullets"] =
            json!(["x".repeat(141)]);

        assert!(validate_output_value(&output).is_err());
    }

    #[test]
    fn test_null_location_accepted() {
        let mut output = valid_output();
        output["groups"][0]["members"][0]["location"] = json!(null);

        assert!(validate_output_value(&output).is_ok());
    }

    #[test]
    fn test_error_is_tagged_as_schema() {
        let err = validate_output_value(&json!([])).unwrap_err();
        assert!(err.to_string().starts_with("[SCHEMA]"));
    }
}
