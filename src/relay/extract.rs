use serde_json::{ Map, Value };

/// Shape of a Flowise response body. Flowise enforces no schema, so the
/// body is classified before any field is read.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    Mapping(Map<String, Value>),
    Scalar(Value),
    Unparseable(String),
}

impl UpstreamResponse {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => UpstreamResponse::Mapping(map),
            Ok(value) => UpstreamResponse::Scalar(value),
            Err(_) => UpstreamResponse::Unparseable(body.to_string()),
        }
    }

    /// Error message the upstream put in its own `error` field, if any.
    pub fn reported_error(&self) -> Option<String> {
        match self {
            UpstreamResponse::Mapping(map) => match map.get("error") {
                None | Some(Value::Null) => None,
                Some(value) => Some(render(value)),
            },
            _ => None,
        }
    }

    /// First truthy candidate field for mappings, the whole value otherwise.
    pub fn answer(&self, fields: &[String]) -> Option<String> {
        match self {
            UpstreamResponse::Mapping(map) => fields
                .iter()
                .filter_map(|field| map.get(field))
                .find(|value| is_truthy(value))
                .map(render),
            UpstreamResponse::Scalar(Value::Null) => None,
            UpstreamResponse::Scalar(value) => Some(render(value)).filter(|s| !s.is_empty()),
            UpstreamResponse::Unparseable(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// Strings go out as-is, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_fields() -> Vec<String> {
        vec!["text".to_string(), "answer".to_string(), "json".to_string()]
    }

    #[test]
    fn text_field_wins() {
        let resp = UpstreamResponse::from_body(r#"{"text":"hello","answer":"hi"}"#);
        assert_eq!(resp.answer(&default_fields()).as_deref(), Some("hello"));
    }

    #[test]
    fn falls_back_to_answer_field() {
        let resp = UpstreamResponse::from_body(r#"{"answer":"hi"}"#);
        assert_eq!(resp.answer(&default_fields()).as_deref(), Some("hi"));
    }

    #[test]
    fn empty_text_is_skipped() {
        let resp = UpstreamResponse::from_body(r#"{"text":"","answer":null,"json":{"score":1}}"#);
        assert_eq!(resp.answer(&default_fields()).as_deref(), Some(r#"{"score":1}"#));
    }

    #[test]
    fn mapping_without_candidates_has_no_answer() {
        let resp = UpstreamResponse::from_body(r#"{"chatId":"abc"}"#);
        assert_eq!(resp.answer(&default_fields()), None);
    }

    #[test]
    fn field_order_is_configurable() {
        let fields = vec!["answer".to_string(), "text".to_string()];
        let resp = UpstreamResponse::from_body(r#"{"text":"hello","answer":"hi"}"#);
        assert_eq!(resp.answer(&fields).as_deref(), Some("hi"));
    }

    #[test]
    fn scalars_are_coerced_to_strings() {
        let fields = default_fields();
        assert_eq!(UpstreamResponse::from_body("42").answer(&fields).as_deref(), Some("42"));
        assert_eq!(UpstreamResponse::from_body(r#""plain""#).answer(&fields).as_deref(), Some("plain"));
        assert_eq!(UpstreamResponse::from_body("[1,2]").answer(&fields).as_deref(), Some("[1,2]"));
        assert_eq!(UpstreamResponse::from_body("null").answer(&fields), None);
    }

    #[test]
    fn unparseable_body_is_passed_through() {
        let resp = UpstreamResponse::from_body("  just text\n");
        assert!(matches!(resp, UpstreamResponse::Unparseable(_)));
        assert_eq!(resp.answer(&default_fields()).as_deref(), Some("just text"));
        assert_eq!(UpstreamResponse::from_body("").answer(&default_fields()), None);
    }

    #[test]
    fn reported_error_is_detected() {
        let resp = UpstreamResponse::from_body(r#"{"error":"chatflow not found"}"#);
        assert_eq!(resp.reported_error().as_deref(), Some("chatflow not found"));
        assert_eq!(UpstreamResponse::from_body(r#"{"error":null,"text":"ok"}"#).reported_error(), None);
        assert_eq!(UpstreamResponse::from_body("42").reported_error(), None);
    }
}
