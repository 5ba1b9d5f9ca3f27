use crate::error::StudyError;
use crate::models::Suggestion;
use async_trait::async_trait;

pub mod client;
pub mod gateway;

pub use client::{OpenRouterClient, DEFAULT_MODEL};
pub use gateway::{explain_entry, parse_suggestion, EXPLAIN_TIMEOUT, TEXT_FALLBACK, TOTAL_FALLBACK};

/// Textual explanation collaborator.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        kanji: &str,
        reading: &str,
        meaning: &str,
    ) -> Result<String, StudyError>;
}

/// Illustration collaborator. `Ok(None)` means the collaborator answered but
/// had no image to offer, which is not a failure.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn illustrate(&self, kanji: &str, meaning: &str)
        -> Result<Option<String>, StudyError>;
}

/// Proposes reading/meaning/category/lesson for a headword.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, headword: &str) -> Result<Suggestion, StudyError>;
}
