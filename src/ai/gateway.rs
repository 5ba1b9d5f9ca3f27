use crate::ai::{ExplanationProvider, ImageProvider};
use crate::logger;
use crate::models::{Explanation, Suggestion, VocabEntry};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

/// Bound on each collaborator call. The upstream interface defines no
/// deadline of its own; expiry is treated as a collaborator failure.
pub const EXPLAIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Substituted when only the explanation branch fails.
pub const TEXT_FALLBACK: &str = "No explanation is available right now.";

/// Reported when both branches fail.
pub const TOTAL_FALLBACK: &str = "Could not reach the AI service. Please try again later.";

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}') {
            cleaned = cleaned[start..=end].to_string();
        }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct SuggestionRaw {
    reading: String,
    meaning: String,
    category: String,
    lesson: u32,
}

/// Parses a suggestion out of a model response, tolerating markdown fences
/// and surrounding prose. Category and lesson are validated against the
/// data model before anything is accepted.
pub fn parse_suggestion(response: &str) -> Result<Suggestion, String> {
    let cleaned = clean_json_response(response);
    let raw: SuggestionRaw = serde_json::from_str(&cleaned).map_err(|e| {
        format!(
            "Failed to parse suggestion as JSON: {}\nRaw: {}\nCleaned: {}",
            e, response, cleaned
        )
    })?;

    if raw.reading.trim().is_empty() || raw.meaning.trim().is_empty() {
        return Err(format!("Suggestion has empty fields. Raw: {}", response));
    }
    if raw.lesson < 1 {
        return Err(format!("Invalid lesson number: {}", raw.lesson));
    }
    let category = crate::models::Category::parse(&raw.category)
        .ok_or_else(|| format!("Unknown category: {}", raw.category))?;

    Ok(Suggestion {
        reading: raw.reading.trim().to_string(),
        meaning: raw.meaning.trim().to_string(),
        category,
        lesson: raw.lesson,
    })
}

/// Fans out to the explanation and image collaborators concurrently and
/// waits for both to settle. A failed branch degrades to its fallback; the
/// operation itself never fails, so the session stays usable.
pub async fn explain_entry(
    text_provider: &dyn ExplanationProvider,
    image_provider: &dyn ImageProvider,
    entry: &VocabEntry,
) -> Explanation {
    explain_entry_with_timeout(text_provider, image_provider, entry, EXPLAIN_TIMEOUT).await
}

async fn explain_entry_with_timeout(
    text_provider: &dyn ExplanationProvider,
    image_provider: &dyn ImageProvider,
    entry: &VocabEntry,
    deadline: Duration,
) -> Explanation {
    let text_fut = timeout(
        deadline,
        text_provider.explain(&entry.kanji, &entry.reading, &entry.meaning),
    );
    let image_fut = timeout(deadline, image_provider.illustrate(&entry.kanji, &entry.meaning));

    let (text_res, image_res) = futures::join!(text_fut, image_fut);

    let text = match text_res {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            logger::log(&format!("Explanation failed for {}: {}", entry.id, e));
            None
        }
        Err(_) => {
            logger::log(&format!("Explanation timed out for {}", entry.id));
            None
        }
    };

    let (image, image_failed) = match image_res {
        Ok(Ok(image)) => (image, false),
        Ok(Err(e)) => {
            logger::log(&format!("Illustration failed for {}: {}", entry.id, e));
            (None, true)
        }
        Err(_) => {
            logger::log(&format!("Illustration timed out for {}", entry.id));
            (None, true)
        }
    };

    match text {
        Some(text) => Explanation { text, image },
        None if image_failed => Explanation {
            text: TOTAL_FALLBACK.to_string(),
            image: None,
        },
        None => Explanation {
            text: TEXT_FALLBACK.to_string(),
            image,
        },
    }
}
