pub mod ai;
pub mod audio;
pub mod db;
pub mod editor;
pub mod error;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod seed;
pub mod selector;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use ai::{
    explain_entry, ExplanationProvider, ImageProvider, OpenRouterClient, SuggestionProvider,
    DEFAULT_MODEL,
};
pub use audio::{spawn_audio_worker, AudioHandle, Speaker, Utterance};
pub use db::SqliteKvStore;
pub use editor::Draft;
pub use error::StudyError;
pub use models::{Category, Explanation, Question, Suggestion, Tab, VocabEntry};
pub use quiz::{QuizEngine, POINTS_PER_CORRECT};
pub use selector::{ScopeMode, SessionSelector};
pub use session::StudySession;
pub use store::{KvStore, MemoryKvStore, VocabStore, VOCAB_KEY};
