use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};
use url::Url;

use super::traits::{LengthBounds, Summarizer};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, Result};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Abstractive summarizer backed by a llama.cpp compatible `/completion` server.
pub struct LlamaSummarizer {
    client: Client,
    server_url: Url,
    auth_token: Option<String>,
    request_timeout: Duration,
}

impl LlamaSummarizer {
    pub fn new(server_url: Url, auth_token: Option<String>, request_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            server_url,
            auth_token,
            request_timeout,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let server_url = Url::parse(&config.summarizer_url)?;
        Ok(Self::new(
            server_url,
            config.summarizer_auth_token.clone(),
            config.summarizer_timeout(),
        ))
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.server_url.join(name)?)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                AnalysisError::Config(format!("Invalid summarizer auth token: {}", e))
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn build_prompt(text: &str, bounds: LengthBounds) -> String {
        format!(
            "Summarize the following meeting transcript in {} to {} words. \
             Focus on decisions, action items and key figures.\n\n\
             Transcript:\n{}\n\nSummary:",
            bounds.min_words, bounds.max_words, text
        )
    }
}

#[async_trait]
impl Summarizer for LlamaSummarizer {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        debug!(
            "Requesting abstractive summary ({}..{} words)",
            bounds.min_words, bounds.max_words
        );

        let payload = serde_json::json!({
            "prompt": Self::build_prompt(text, bounds),
            "stream": false,
            "n_predict": bounds.max_words * 2,
        });

        let request = self
            .client
            .post(self.endpoint("completion")?)
            .headers(self.headers()?)
            .json(&payload)
            .send();

        let res = timeout(self.request_timeout, request).await??;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AnalysisError::Collaborator(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;
        let content = json["content"].as_str().unwrap_or("").trim();
        if content.is_empty() {
            return Err(AnalysisError::Collaborator(
                "Summarizer returned empty content".to_string(),
            ));
        }

        info!("Abstractive summary received ({} chars)", content.len());
        Ok(content.to_string())
    }

    async fn health_check(&self) -> Result<()> {
        let request = self
            .client
            .get(self.endpoint("health")?)
            .headers(self.headers()?)
            .send();
        let res = timeout(HEALTH_TIMEOUT, request).await??;
        if res.status().is_success() {
            Ok(())
        } else {
            Err(AnalysisError::Collaborator(format!(
                "Summarizer health check returned {}",
                res.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "llama-server"
    }
}
