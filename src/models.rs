use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The wire shape sent to the generation endpoint. Built fresh per
/// submission, immutable once built, never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: String,
    #[serde(rename = "inputImage", skip_serializing_if = "Option::is_none")]
    pub input_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// A normalized reference image on local storage, ready for encoding.
/// At most one is selected at a time; picking a new one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredImage {
    /// Opaque handle to the normalized image data.
    pub local_ref: PathBuf,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of the single in-flight generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded { image_url: String },
    Failed { message: String },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// `Succeeded` or `Failed`: a new submission or a reset is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Succeeded { .. } | RequestState::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_serializes_to_wire_names() {
        let req = GenerationRequest {
            prompt: "a cat".into(),
            style: "anime".into(),
            input_image: Some("data:image/jpeg;base64,AAAA".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["inputImage"], "data:image/jpeg;base64,AAAA");
        assert_eq!(json["style"], "anime");
    }

    #[test]
    fn absent_input_image_is_omitted() {
        let req = GenerationRequest {
            prompt: "a cat".into(),
            style: "anime".into(),
            input_image: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("inputImage").is_none());
    }

    #[test]
    fn response_parses_wire_names() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{"imageUrl":"https://cdn.example/img.jpg"}"#).unwrap();
        assert_eq!(resp.image_url, "https://cdn.example/img.jpg");
    }
}
