use serde::{ Serialize, Deserialize };

/// Body of `POST /ask` sent by the chat page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Prediction request understood by Flowise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
}

impl QuestionPayload {
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_tolerates_missing_message() {
        let req: AskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());

        let req: AskRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn question_payload_uses_flowise_field_name() {
        let body = serde_json::to_string(&QuestionPayload::new("hello")).unwrap();
        assert_eq!(body, r#"{"question":"hello"}"#);
    }
}
