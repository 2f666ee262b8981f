//! Serper (Google Search API) adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::trait_def::SearchProvider;
use super::types::{ProviderError, SearchHit, truncate_body};
use crate::config::SerperConfig;

const PROVIDER: &str = "serper";

/// [`SearchProvider`] backed by `google.serper.dev`.
#[derive(Debug, Clone)]
pub struct SerperClient {
    http: Client,
    config: SerperConfig,
}

impl SerperClient {
    pub fn new(config: SerperConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: SerperConfig, http: Client) -> Self {
        if !config.api_key.is_configured() {
            tracing::info!("Serper provider has no API key; resource lookups will return nothing");
        }
        Self { http, config }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// Convert organic results to hits, dropping entries without a link.
fn hits_from_response(response: SearchResponse) -> Vec<SearchHit> {
    response
        .organic
        .into_iter()
        .filter_map(|r| {
            let url = r.link.filter(|l| !l.trim().is_empty())?;
            Some(SearchHit {
                title: r.title.unwrap_or_default(),
                url,
                snippet: r.snippet,
            })
        })
        .collect()
}

#[async_trait]
impl SearchProvider for SerperClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn query(&self, term: &str, count: usize) -> Result<Vec<SearchHit>, ProviderError> {
        let key = self
            .config
            .api_key
            .secret()
            .ok_or(ProviderError::Unconfigured(PROVIDER))?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-KEY", key)
            .json(&SearchRequest { q: term, num: count })
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

        let decoded: SearchResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        Ok(hits_from_response(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;

    #[test]
    fn organic_results_become_hits_in_order() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "searchParameters": {"q": "rust"},
                "organic": [
                    {"title": "The Book", "link": "https://doc.rust-lang.org/book/", "snippet": "Learn Rust", "position": 1},
                    {"title": "No link"},
                    {"link": "https://example.com/untitled"}
                ]
            }"#,
        )
        .unwrap();

        let hits = hits_from_response(response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "The Book");
        assert_eq!(hits[0].snippet.as_deref(), Some("Learn Rust"));
        assert_eq!(hits[1].url, "https://example.com/untitled");
        assert_eq!(hits[1].title, "");
    }

    #[test]
    fn missing_organic_section_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"knowledgeGraph": {}}"#).unwrap();
        assert!(hits_from_response(response).is_empty());
    }

    #[tokio::test]
    async fn unconfigured_client_reports_typed_state() {
        let client = SerperClient::new(SerperConfig::new(Credential::Unconfigured));
        let err = client.query("rust", 3).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unconfigured("serper")));
    }
}
