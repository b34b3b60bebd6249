//! Named-entity recognition seam
//!
//! Person names come from an external NER model. The model is reached
//! through [`NameRecognizer`] so it can be loaded once per process and
//! injected wherever extraction happens.

use crate::config::{NerConfig, UserAgentConfig};
use crate::extract::ExtractError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A labeled span produced by a recognizer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

#[async_trait]
pub trait NameRecognizer: Send + Sync {
    /// Run recognition over `text` and return every labeled span.
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractError>;
}

/// Recognizer used when no model is configured. Finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecognizer;

#[async_trait]
impl NameRecognizer for NullRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, ExtractError> {
        Ok(Vec::new())
    }
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    ents: Vec<EntitySpan>,
}

/// Recognizer backed by an HTTP NER service
///
/// Posts `{"text": ...}` and expects spaCy-style output:
/// `{"ents": [{"text": "Jane Doe", "label": "PERSON"}, ...]}`.
pub struct HttpNameRecognizer {
    client: Client,
    endpoint: String,
}

impl HttpNameRecognizer {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl NameRecognizer for HttpNameRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RecognizeRequest { text })
            .send()
            .await?
            .error_for_status()?;

        let body: RecognizeResponse = response.json().await?;
        Ok(body.ents)
    }
}

/// Builds the process-wide recognizer from configuration
///
/// Without an endpoint names are not extracted; a warning is logged so the
/// operator knows the `names` field will stay empty.
pub fn build_recognizer(
    config: &NerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Arc<dyn NameRecognizer>, ExtractError> {
    match &config.endpoint {
        Some(endpoint) => {
            tracing::info!("Using NER service at {}", endpoint);
            let recognizer = HttpNameRecognizer::new(
                endpoint.clone(),
                Duration::from_secs(config.timeout_secs),
                user_agent,
            )?;
            Ok(Arc::new(recognizer))
        }
        None => {
            tracing::warn!("No NER endpoint configured; person names will not be extracted");
            Ok(Arc::new(NullRecognizer))
        }
    }
}
