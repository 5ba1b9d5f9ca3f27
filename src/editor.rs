use crate::ai::SuggestionProvider;
use crate::error::StudyError;
use crate::logger;
use crate::models::{Category, VocabEntry};
use crate::store::VocabStore;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fallbacks for an unset draft: the defaults of the add form.
pub const DEFAULT_CATEGORY: Category = Category::General;
pub const DEFAULT_LESSON: u32 = 1;

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Fresh opaque id: creation timestamp plus a process-wide sequence so two
/// entries created in the same millisecond still differ.
fn fresh_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", millis, seq)
}

/// The add-entry form. Category and lesson stay unset until the user (or a
/// suggestion) picks them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub kanji: String,
    pub reading: String,
    pub meaning: String,
    pub category: Option<Category>,
    pub lesson: Option<u32>,
}

impl Draft {
    pub fn new(kanji: impl Into<String>) -> Self {
        Self {
            kanji: kanji.into(),
            ..Self::default()
        }
    }
}

/// Validates the draft and appends it to the store. Validation failure
/// performs no mutation; the created entry is returned on success.
pub fn submit(store: &mut VocabStore, draft: &Draft) -> Result<VocabEntry, StudyError> {
    let kanji = draft.kanji.trim();
    let reading = draft.reading.trim();
    let meaning = draft.meaning.trim();

    if kanji.is_empty() || reading.is_empty() || meaning.is_empty() {
        return Err(StudyError::Validation(
            "kanji, reading and meaning are all required".to_string(),
        ));
    }

    let entry = VocabEntry {
        id: fresh_id(),
        kanji: kanji.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
        category: draft.category.unwrap_or(DEFAULT_CATEGORY),
        lesson: draft.lesson.unwrap_or(DEFAULT_LESSON),
    };

    store.append(entry.clone())?;
    Ok(entry)
}

/// Asks the suggestion collaborator to fill in the draft for its headword.
/// On success every field except the kanji is overwritten; on failure the
/// draft is left exactly as it was and a non-fatal error is reported.
pub async fn request_suggestion(
    provider: &dyn SuggestionProvider,
    draft: &mut Draft,
) -> Result<(), StudyError> {
    let headword = draft.kanji.trim();
    if headword.is_empty() {
        return Err(StudyError::Validation(
            "enter a headword before requesting a suggestion".to_string(),
        ));
    }

    match provider.suggest(headword).await {
        Ok(suggestion) => {
            draft.reading = suggestion.reading;
            draft.meaning = suggestion.meaning;
            draft.category = Some(suggestion.category);
            draft.lesson = Some(suggestion.lesson);
            Ok(())
        }
        Err(e) => {
            logger::log(&format!("Suggestion failed for '{}': {}", headword, e));
            Err(e)
        }
    }
}
