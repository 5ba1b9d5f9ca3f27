use crate::error::StudyError;
use crate::logger;
use crate::models::VocabEntry;
use crate::seed;
use std::collections::HashMap;

/// Fixed key the whole collection is persisted under.
pub const VOCAB_KEY: &str = "vocab_data";

/// The persistence collaborator: a flat key-value surface holding the
/// JSON-serialized collection under [`VOCAB_KEY`].
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError>;
}

/// In-memory `KvStore` for tests and embedding without a durable backend.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Ordered in-memory collection mirrored to one key in the injected store.
/// Every mutation persists the full collection synchronously; the store does
/// not validate entries, callers do.
pub struct VocabStore {
    kv: Box<dyn KvStore>,
    entries: Vec<VocabEntry>,
}

impl VocabStore {
    /// Loads the persisted collection, falling back to the seed set when the
    /// key is missing, unreadable as JSON, or holds an empty array.
    pub fn load(kv: Box<dyn KvStore>) -> Result<Self, StudyError> {
        let entries = match kv.get(VOCAB_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<VocabEntry>>(&raw) {
                Ok(parsed) if !parsed.is_empty() => parsed,
                Ok(_) => seed::initial_vocab(),
                Err(e) => {
                    logger::log(&format!("Discarding unreadable vocab blob: {}", e));
                    seed::initial_vocab()
                }
            },
            None => seed::initial_vocab(),
        };
        Ok(Self { kv, entries })
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends one entry preserving order, then persists the whole
    /// collection. The entry stays in memory even if persistence fails, so
    /// the session remains usable; the error still surfaces.
    pub fn append(&mut self, entry: VocabEntry) -> Result<(), StudyError> {
        self.entries.push(entry);
        self.persist()
    }

    /// Discards every user-added entry and restores the original seed set.
    pub fn reset_to_seed(&mut self) -> Result<(), StudyError> {
        self.entries = seed::initial_vocab();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StudyError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| StudyError::Persistence(format!("serialize failed: {}", e)))?;
        self.kv.set(VOCAB_KEY, &raw)
    }
}
