use serde_json::{json, Value};
use std::fmt;

/// The parsed value did not have the gross shape the endpoint promised its
/// callers. Carries the raw model text so the error payload can expose it
/// for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedResponse {
    pub raw: String,
}

impl MalformedResponse {
    fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }
}

impl fmt::Display for MalformedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed model response")
    }
}

impl std::error::Error for MalformedResponse {}

/// Normalize a parsed school-response payload: an object carrying a
/// `schoolResponse` string and an `options` array. Every object element of
/// `options` gets `type` / `text` / `textExplanation` defaulted to `""`.
/// Order is preserved, nothing is deduplicated, and no cap is enforced even
/// though the prompt asks for 2-4 options. Elements that are not objects are
/// left untouched.
pub fn normalize_school_response(
    parsed: Option<Value>,
    raw: &str,
) -> Result<Value, MalformedResponse> {
    let mut value = parsed.ok_or_else(|| MalformedResponse::from_raw(raw))?;

    {
        let obj = value
            .as_object_mut()
            .ok_or_else(|| MalformedResponse::from_raw(raw))?;
        if !obj.contains_key("schoolResponse") {
            return Err(MalformedResponse::from_raw(raw));
        }
        let options = obj
            .get_mut("options")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| MalformedResponse::from_raw(raw))?;
        for opt in options.iter_mut() {
            if let Some(fields) = opt.as_object_mut() {
                fields.entry("type").or_insert_with(|| json!(""));
                fields.entry("text").or_insert_with(|| json!(""));
                fields.entry("textExplanation").or_insert_with(|| json!(""));
            }
        }
    }

    Ok(value)
}

/// Normalize a parsed outcome-score payload: an array of score records.
/// Object elements get `outcome` → `""`, `score` → `0`, `explanation` → `""`
/// when absent. The score is deliberately not checked for numeric type or
/// the 0-100 range; whatever the model produced flows through.
pub fn normalize_score_list(parsed: Option<Value>, raw: &str) -> Result<Value, MalformedResponse> {
    let mut value = parsed.ok_or_else(|| MalformedResponse::from_raw(raw))?;

    {
        let scores = value
            .as_array_mut()
            .ok_or_else(|| MalformedResponse::from_raw(raw))?;
        for score in scores.iter_mut() {
            if let Some(fields) = score.as_object_mut() {
                fields.entry("outcome").or_insert_with(|| json!(""));
                fields.entry("score").or_insert_with(|| json!(0));
                fields.entry("explanation").or_insert_with(|| json!(""));
            }
        }
    }

    Ok(value)
}
