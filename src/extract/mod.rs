//! Entity extraction over flattened page text
//!
//! Three independent extractors run over the same text:
//! - email addresses (regex)
//! - US phone numbers (regex candidates validated with libphonenumber data)
//! - person names (external NER model behind [`NameRecognizer`])
//!
//! [`EntityExtractor::extract_all`] runs each one behind its own failure
//! boundary. An extractor that errors or panics contributes an empty list
//! and a warning; the other two results are kept.

mod emails;
mod names;
mod phones;
mod recognizer;

pub use emails::extract_emails;
pub use names::{person_names, NAME_STOPLIST, PERSON_LABEL};
pub use phones::extract_phone_numbers;
pub use recognizer::{build_recognizer, EntitySpan, HttpNameRecognizer, NameRecognizer, NullRecognizer};

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised inside an extractor
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Name recognizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Name recognizer failed: {0}")]
    Recognizer(String),

    #[error("{0} extractor panicked")]
    Panicked(&'static str),
}

/// The three entity sets stored on a URL record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub names: Vec<String>,
}

/// Runs the entity extractors with a shared, injected name recognizer
#[derive(Clone)]
pub struct EntityExtractor {
    recognizer: Arc<dyn NameRecognizer>,
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn NameRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Extracts person names from text
    ///
    /// The recognizer runs on its own task so a panic inside the model
    /// surfaces as [`ExtractError::Panicked`] instead of unwinding the crawl.
    pub async fn extract_names(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let recognizer = Arc::clone(&self.recognizer);
        let owned = text.to_owned();
        let spans = tokio::spawn(async move { recognizer.recognize(&owned).await })
            .await
            .map_err(|e| {
                if e.is_panic() {
                    ExtractError::Panicked("name")
                } else {
                    ExtractError::Recognizer(e.to_string())
                }
            })??;

        Ok(person_names(spans))
    }

    /// Runs all three extractors, isolating failures per entity type
    pub async fn extract_all(&self, text: &str) -> ExtractedEntities {
        let emails = isolate("email", || extract_emails(text));
        let phone_numbers = isolate("phone", || extract_phone_numbers(text));

        let names = match self.extract_names(text).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Name extraction failed, storing no names: {}", e);
                Vec::new()
            }
        };

        ExtractedEntities {
            emails,
            phone_numbers,
            names,
        }
    }
}

/// Runs a synchronous extractor, converting a panic into an empty result
fn isolate<F>(kind: &'static str, extractor: F) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    match panic::catch_unwind(AssertUnwindSafe(extractor)) {
        Ok(found) => found,
        Err(_) => {
            tracing::warn!("{}", ExtractError::Panicked(kind));
            Vec::new()
        }
    }
}
