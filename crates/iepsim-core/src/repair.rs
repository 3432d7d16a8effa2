use serde_json::Value;

/// Tolerant parse of model output. Strict JSON is returned as-is; otherwise
/// one layer of Markdown code fencing is stripped from the trimmed text and
/// the parse retried once. `None` is the "nothing parsed" sentinel: callers
/// decide how to report it, usually by echoing the raw text back in an error
/// payload.
///
/// Doubly-fenced output still fails after the single strip; that is an
/// accepted limitation, not something to paper over further.
pub fn loose_parse(text: &str) -> Option<Value> {
    if let Ok(v) = serde_json::from_str(text) {
        return Some(v);
    }
    let stripped = strip_fences(text);
    match serde_json::from_str(stripped) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::debug!(error = %err, "model output is not JSON after fence strip");
            None
        }
    }
}

/// Remove at most one leading fence opener (the `json`-tagged form first,
/// then a bare one) and at most one trailing fence from the trimmed text.
/// Interior fences are left alone.
fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json_passes_through() {
        assert_eq!(loose_parse(r#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(loose_parse("[1,2,3]"), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_bare_scalar_is_returned_as_is() {
        // Shape validation is the normalizer's job.
        assert_eq!(loose_parse("42"), Some(json!(42)));
        assert_eq!(loose_parse("\"hello\""), Some(json!("hello")));
    }

    #[test]
    fn test_json_fence_is_stripped() {
        assert_eq!(
            loose_parse("```json\n{\"a\":1}\n```"),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn test_bare_fence_is_stripped() {
        assert_eq!(loose_parse("```\n[{\"score\": 80}]\n```"), Some(json!([{"score": 80}])));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert_eq!(
            loose_parse("  \n```json\n{\"a\":1}\n```\n  "),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn test_garbage_returns_sentinel() {
        assert_eq!(loose_parse("not json at all"), None);
    }

    #[test]
    fn test_empty_string_returns_sentinel() {
        assert_eq!(loose_parse(""), None);
        assert_eq!(loose_parse("   "), None);
    }

    #[test]
    fn test_only_outer_fence_layer_is_stripped() {
        // Double-fenced output still fails: deliberate, not a bug.
        assert_eq!(loose_parse("```json\n```json\n{\"a\":1}\n```\n```"), None);
    }

    #[test]
    fn test_interior_fences_untouched() {
        let text = "```json\n{\"a\": \"code ``` inside\"}\n```";
        assert_eq!(loose_parse(text), Some(json!({"a": "code ``` inside"})));
    }

    #[test]
    fn test_fence_without_json_stays_sentinel() {
        assert_eq!(loose_parse("```json\nstill not json\n```"), None);
    }
}
