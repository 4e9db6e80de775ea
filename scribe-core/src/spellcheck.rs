//! Spell correction for note text.
//!
//! Provides a `SpellChecker` trait and `YandexSpeller`, a client for the Yandex
//! Speller `checkText` JSON API. Correction is all-or-nothing per call: if the
//! service cannot be reached or answers with something unexpected, the caller
//! gets an error, never partially corrected text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SpellChecker trait
// ============================================================================

#[async_trait]
pub trait SpellChecker: Send + Sync {
    /// Return `text` with the service's top suggestions applied.
    async fn correct_text(&self, text: &str) -> Result<String, SpellcheckError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

// ============================================================================
// Error types
// ============================================================================

#[derive(Error, Debug)]
pub enum SpellcheckError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Wire types
// ============================================================================

/// One misspelling reported by the service. Only `word` and `s` are used;
/// the positional fields are kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpellcheckSuggestion {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub pos: i64,
    #[serde(default)]
    pub row: i64,
    #[serde(default)]
    pub col: i64,
    #[serde(default)]
    pub len: i64,
    pub word: String,
    /// Replacement candidates, best first.
    #[serde(default)]
    pub s: Vec<String>,
}

/// Apply suggestions to `text`.
///
/// Suggestions are visited last to first. Each one with at least one candidate
/// replaces the first occurrence of its word with the top candidate, so a word
/// misspelled twice is only corrected once per suggestion.
pub fn apply_corrections(text: &str, suggestions: &[SpellcheckSuggestion]) -> String {
    suggestions
        .iter()
        .rev()
        .fold(text.to_string(), |acc, suggestion| match suggestion.s.first() {
            Some(best) => acc.replacen(&suggestion.word, best, 1),
            None => acc,
        })
}

// ============================================================================
// YandexSpeller
// ============================================================================

#[derive(Debug, Clone)]
pub struct YandexSpeller {
    client: Client,
    base_url: String,
}

impl YandexSpeller {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SpellcheckError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ask the service which words in `text` look misspelled.
    pub async fn check_text(&self, text: &str) -> Result<Vec<SpellcheckSuggestion>, SpellcheckError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("text", text)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(code = status.as_u16(), body = %body, "Spellcheck API error");
            return Err(SpellcheckError::Api {
                code: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SpellChecker for YandexSpeller {
    async fn correct_text(&self, text: &str) -> Result<String, SpellcheckError> {
        let suggestions = self.check_text(text).await?;
        tracing::debug!(count = suggestions.len(), "Spellcheck suggestions received");
        Ok(apply_corrections(text, &suggestions))
    }

    fn name(&self) -> &str {
        "yandex"
    }
}

// ============================================================================
// TESTS
// ============================================================================
