use crate::error::StudyError;
use crate::store::KvStore;
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\vocab-trainer")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/vocab-trainer")
    }
}

pub fn get_db_path() -> PathBuf {
    get_data_dir().join("vocab.db")
}

/// Durable `KvStore` backed by a single sqlite table. The vocabulary blob
/// lives in one row; no schema knowledge of entries leaks into the database.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (creating if needed) the store at the platform data dir.
    pub fn open_default() -> Result<Self, StudyError> {
        let db_path = get_db_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        Self::open(&db_path)
    }

    pub fn open(path: &std::path::Path) -> Result<Self, StudyError> {
        let conn = Connection::open(path)
            .map_err(|e| StudyError::Persistence(format!("open {}: {}", path.display(), e)))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn open_in_memory() -> Result<Self, StudyError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StudyError::Persistence(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

fn run_migrations(conn: &Connection) -> Result<(), StudyError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| StudyError::Persistence(format!("migration failed: {}", e)))?;
    Ok(())
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| StudyError::Persistence(format!("get {}: {}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError> {
        let now = chrono::Utc::now().timestamp();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                rusqlite::params![key, value, now],
            )
            .map_err(|e| StudyError::Persistence(format!("set {}: {}", key, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{VocabStore, VOCAB_KEY};

    #[test]
    fn test_get_missing_key_is_none() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set(VOCAB_KEY, "[1,2,3]").unwrap();
        assert_eq!(store.get(VOCAB_KEY).unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_vocab_store_persists_across_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("vocab.db");

        let entry_id = {
            let kv = SqliteKvStore::open(&db_path).unwrap();
            let mut store = VocabStore::load(Box::new(kv)).unwrap();
            let entry = crate::models::VocabEntry {
                id: "persisted-1".to_string(),
                kanji: "駅".to_string(),
                reading: "えき".to_string(),
                meaning: "station".to_string(),
                category: crate::models::Category::Kanji,
                lesson: 5,
            };
            store.append(entry).unwrap();
            "persisted-1"
        };

        let kv = SqliteKvStore::open(&db_path).unwrap();
        let store = VocabStore::load(Box::new(kv)).unwrap();
        assert!(store.entries().iter().any(|e| e.id == entry_id));
    }
}
