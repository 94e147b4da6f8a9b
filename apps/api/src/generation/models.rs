use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::resume::{Experience, ResumeData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Summary,
    Bullets,
    Skills,
}

/// Body of `POST /api/generate` before the payload is checked against the
/// requested type.
#[derive(Debug, Deserialize)]
pub struct RawGenerateRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateRequest {
    Summary(ResumeData),
    Bullets(Experience),
    Skills(Vec<String>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid type")]
    InvalidType,

    #[error("Invalid data for type '{0}'")]
    InvalidData(&'static str),
}

impl TryFrom<RawGenerateRequest> for GenerateRequest {
    type Error = RequestError;

    fn try_from(raw: RawGenerateRequest) -> Result<Self, Self::Error> {
        match raw.kind.as_deref() {
            Some("summary") => serde_json::from_value(raw.data)
                .map(GenerateRequest::Summary)
                .map_err(|_| RequestError::InvalidData("summary")),
            Some("bullets") => serde_json::from_value(raw.data)
                .map(GenerateRequest::Bullets)
                .map_err(|_| RequestError::InvalidData("bullets")),
            Some("skills") => serde_json::from_value(raw.data)
                .map(GenerateRequest::Skills)
                .map_err(|_| RequestError::InvalidData("skills")),
            _ => Err(RequestError::InvalidType),
        }
    }
}

/// A summary is plain text; bullets and skills are lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeneratedText {
    Text(String),
    List(Vec<String>),
}

/// `{"result": ...}` on success, `{"error": "..."}` otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Result { result: GeneratedText },
    Error { error: String },
}

/// Body of `POST /api/v1/draft/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftGenerateRequest {
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    pub experience_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawGenerateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_by_type() {
        let req = GenerateRequest::try_from(raw(json!({
            "type": "skills",
            "data": ["Rust", "Go"]
        })));
        assert_eq!(req, Ok(GenerateRequest::Skills(vec!["Rust".into(), "Go".into()])));

        let req = GenerateRequest::try_from(raw(json!({
            "type": "bullets",
            "data": {"id": "1", "role": "Dev", "company": "Acme"}
        })))
        .unwrap();
        let GenerateRequest::Bullets(experience) = req else {
            panic!("expected bullets");
        };
        assert_eq!(experience.company, "Acme");
    }

    #[test]
    fn test_unknown_or_missing_type() {
        for body in [json!({"type": "cover_letter", "data": {}}), json!({"data": {}})] {
            assert_eq!(
                GenerateRequest::try_from(raw(body)),
                Err(RequestError::InvalidType)
            );
        }
    }

    #[test]
    fn test_mismatched_data() {
        let req = GenerateRequest::try_from(raw(json!({"type": "skills", "data": "Rust"})));
        assert_eq!(req, Err(RequestError::InvalidData("skills")));
    }

    #[test]
    fn test_response_shapes() {
        let ok = GenerateResponse::Result {
            result: GeneratedText::List(vec!["a".into()]),
        };
        assert_eq!(serde_json::to_value(ok).unwrap(), json!({"result": ["a"]}));
        let err = GenerateResponse::Error {
            error: "Invalid type".into(),
        };
        assert_eq!(serde_json::to_value(err).unwrap(), json!({"error": "Invalid type"}));
    }
}
