use serde::{Deserialize, Serialize};

/// Closed set of entry categories. Everything that is neither a kanji study
/// item nor a verb falls under `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Kanji,
    Verb,
    General,
}

/// A single vocabulary entry. Entries are never mutated in place: they are
/// created by the seed set or the dictionary editor and only destroyed by a
/// reset to the seed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: String,
    pub kanji: String,
    pub reading: String,
    pub meaning: String,
    pub category: Category,
    pub lesson: u32,
}

/// One quiz round: a target entry plus the shuffled option set it hides in.
/// The target appears in `options` exactly once; the option count is
/// `min(4, working set size)`.
#[derive(Debug, Clone)]
pub struct Question {
    pub target: VocabEntry,
    pub options: Vec<VocabEntry>,
}

/// Details proposed by the suggestion collaborator for a headword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub reading: String,
    pub meaning: String,
    pub category: Category,
    pub lesson: u32,
}

/// Result of the explain gateway: always populated, falling back to a fixed
/// message when the collaborators are unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub text: String,
    pub image: Option<String>,
}

/// Outcome of a submitted quiz answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub message: String,
}

/// The study tabs of the app. Tab transitions drive question generation and
/// audio cancellation in `StudySession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Flashcards,
    Quiz,
    Search,
    Add,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kanji" => Some(Category::Kanji),
            "verb" => Some(Category::Verb),
            "general" => Some(Category::General),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Kanji => "kanji",
            Category::Verb => "verb",
            Category::General => "general",
        }
    }
}
