//! Gemini generation adapter.
//!
//! Calls the Generative Language `generateContent` endpoint with a single
//! user turn and concatenates the text parts of the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::trait_def::GenerationProvider;
use super::types::{ProviderError, truncate_body};
use crate::config::GeminiConfig;

const PROVIDER: &str = "gemini";

/// [`GenerationProvider`] backed by Google Gemini.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Reuse an existing `reqwest` client (connection pool, proxy settings).
    pub fn with_client(config: GeminiConfig, http: Client) -> Self {
        if !config.api_key.is_configured() {
            tracing::warn!("Gemini provider created without an API key; generation will fail");
        }
        Self { http, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Pull the generated text out of a decoded response.
fn response_text(response: GenerateResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ProviderError::InvalidResponse {
            provider: PROVIDER,
            message: format!("prompt blocked: {reason}"),
        });
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse {
            provider: PROVIDER,
            message: "response contained no candidates".to_string(),
        })?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(ProviderError::InvalidResponse {
            provider: PROVIDER,
            message: format!("candidate contained no text (finish reason: {reason})"),
        });
    }

    Ok(text)
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let key = self
            .config
            .api_key
            .secret()
            .ok_or(ProviderError::Unconfigured(PROVIDER))?;

        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, prompt_chars = prompt.len(), "sending generation request");

        let response = self
            .http
            .post(self.config.generate_url())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let decoded: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        response_text(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;

    fn decode(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let response = decode(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "[{\"day\":"}, {"text": " \"Day 1\"}]"}]}, "finishReason": "STOP"},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            }"#,
        );
        assert_eq!(response_text(response).unwrap(), "[{\"day\": \"Day 1\"}]");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response = decode(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        let err = response_text(response).unwrap_err();
        assert!(err.to_string().contains("prompt blocked: SAFETY"), "{err}");
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let err = response_text(decode("{}")).unwrap_err();
        assert!(err.to_string().contains("no candidates"), "{err}");
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let response = decode(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#);
        let err = response_text(response).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"), "{err}");
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[tokio::test]
    async fn unconfigured_client_fails_without_network() {
        let client = GeminiClient::new(GeminiConfig::new(Credential::Unconfigured));
        let err = client.complete("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unconfigured("gemini")));
    }
}
