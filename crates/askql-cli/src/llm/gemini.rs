//! Gemini generateContent client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Longest error-body excerpt echoed back to the user.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the Gemini `generateContent` endpoint.
///
/// The API key is captured once at construction; when it is absent every
/// call fails with [`CompletionError::MissingApiKey`] without touching the
/// network.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

// Request/response shapes, limited to the fields this client touches.

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "stopSequences")]
    stop_sequences: &'a [&'a str],
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response.candidates.into_iter().find_map(|candidate| {
        candidate
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    })
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        stop_sequences: &[&str],
    ) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                stop_sequences,
                temperature: 0.0,
            },
        };

        let send = self.http.post(&url).json(&request).send();
        let response = tokio::time::timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS), send)
            .await
            .map_err(|_| CompletionError::Timeout(REQUEST_TIMEOUT_SECS))??;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: GenerateContentResponse = response.json().await?;
        first_candidate_text(decoded).ok_or(CompletionError::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new("gemini-1.5-pro", None);
        let err = client.complete("prompt", &[]).await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[tokio::test]
    async fn empty_key_counts_as_missing() {
        let client = GeminiClient::new("gemini-1.5-pro", Some(String::new()));
        let err = client.complete("prompt", &[]).await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[test]
    fn response_text_is_found_in_first_candidate() {
        let decoded: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "SELECT 1"}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(first_candidate_text(decoded).as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let decoded: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(first_candidate_text(decoded), None);

        let decoded: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": null}]}"#).unwrap();
        assert_eq!(first_candidate_text(decoded), None);
    }

    #[test]
    fn request_serializes_stop_sequences() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "p" }],
            }],
            generation_config: GenerationConfig {
                stop_sequences: &["\nSQL Result:"],
                temperature: 0.0,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["stopSequences"][0],
            "\nSQL Result:"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "p");
    }
}
