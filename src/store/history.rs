use super::storage::KeyValueStore;
use crate::error::Result;
use crate::models::{Language, Session};
use colored::*;

pub const HISTORY_KEY: &str = "minimalist_lens_history";
pub const LANGUAGE_KEY: &str = "minimalist_lens_lang";

/// The session archive, newest first, persisted as one JSON array.
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    sessions: Vec<Session>,
    verbose: bool,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open the archive, loading whatever is currently persisted.
    pub fn open(storage: S) -> Self {
        Self::open_with_verbose(storage, false)
    }

    /// Like [`HistoryStore::open`], with `[store]` diagnostics enabled before the first load.
    pub fn open_with_verbose(storage: S, verbose: bool) -> Self {
        let mut store = Self {
            storage,
            sessions: Vec::new(),
            verbose,
        };
        store.sessions = store.load();
        store
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Read the persisted archive. Missing or corrupt data yields an empty list.
    pub fn load(&self) -> Vec<Session> {
        let Some(raw) = self.storage.get(HISTORY_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<Session>>(&raw) {
            Ok(sessions) => sessions,
            Err(e) => {
                if self.verbose {
                    eprintln!(
                        "{}",
                        format!("[store] Ignoring unreadable history: {}", e).dimmed()
                    );
                }
                Vec::new()
            }
        }
    }

    /// Prepend a session and persist the whole archive.
    ///
    /// The in-memory list only changes once the write has succeeded.
    pub fn append_and_save(&mut self, session: Session) -> Result<()> {
        let mut next = Vec::with_capacity(self.sessions.len() + 1);
        next.extend(self.sessions.iter().filter(|s| s.id != session.id).cloned());
        next.insert(0, session);
        self.persist(next)
    }

    /// Drop one session by id and persist. Unknown ids leave the archive untouched.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Ok(());
        }
        let next = self.sessions.iter().filter(|s| s.id != id).cloned().collect();
        self.persist(next)
    }

    /// Erase the archive from storage.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(HISTORY_KEY)?;
        self.sessions.clear();
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, sessions: Vec<Session>) -> Result<()> {
        let content = serde_json::to_string(&sessions)?;
        self.storage.set(HISTORY_KEY, &content)?;
        self.sessions = sessions;
        if self.verbose {
            eprintln!(
                "{}",
                format!("[store] Saved {} session(s)", self.sessions.len()).dimmed()
            );
        }
        Ok(())
    }
}

/// Stored UI language, falling back to the default when absent or unknown.
pub fn load_language<S: KeyValueStore + ?Sized>(storage: &S) -> Language {
    storage
        .get(LANGUAGE_KEY)
        .and_then(|code| code.parse().ok())
        .unwrap_or_default()
}

pub fn save_language<S: KeyValueStore + ?Sized>(storage: &S, language: Language) -> Result<()> {
    storage.set(LANGUAGE_KEY, language.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LensError;
    use crate::models::AdviceResult;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        read_only: AtomicBool,
    }

    impl FlakyStore {
        fn check(&self) -> Result<()> {
            if self.read_only.load(Ordering::SeqCst) {
                return Err(LensError::StorageError("disk full".into()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.check()?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.check()?;
            self.inner.remove(key)
        }
    }

    fn sample_session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            image: "data:image/png;base64,AAAA".to_string(),
            questions: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            answers: vec!["A1".into(), "A2".into(), "A3".into()],
            advice: AdviceResult {
                summary: "S".into(),
                tips: vec!["T1".into()],
                reflection: "R".into(),
            },
            language: Language::En,
        }
    }

    #[test]
    fn test_corrupt_history_loads_empty() {
        let storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "{not json").unwrap();

        let store = HistoryStore::open(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut store = HistoryStore::open(MemoryStore::new());
        store.append_and_save(sample_session("a")).unwrap();
        store.append_and_save(sample_session("b")).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "b");
        assert_eq!(loaded[1].id, "a");
    }

    #[test]
    fn test_append_keeps_ids_unique() {
        let mut store = HistoryStore::open(MemoryStore::new());
        store.append_and_save(sample_session("a")).unwrap();
        store.append_and_save(sample_session("a")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = HistoryStore::open(MemoryStore::new());
        store.append_and_save(sample_session("a")).unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_language_defaults_and_round_trips() {
        let storage = MemoryStore::new();
        assert_eq!(load_language(&storage), Language::Zh);

        storage.set(LANGUAGE_KEY, "fr").unwrap();
        assert_eq!(load_language(&storage), Language::Zh);

        save_language(&storage, Language::En).unwrap();
        assert_eq!(load_language(&storage), Language::En);
    }

    #[test]
    fn test_failed_writes_leave_memory_matching_storage() {
        let mut store = HistoryStore::open(FlakyStore::default());
        store.append_and_save(sample_session("a")).unwrap();
        store.storage().read_only.store(true, Ordering::SeqCst);

        assert!(store.append_and_save(sample_session("b")).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions(), store.load().as_slice());

        assert!(store.remove("a").is_err());
        assert!(store.get("a").is_some());
        assert_eq!(store.sessions(), store.load().as_slice());

        assert!(store.clear().is_err());
        assert_eq!(store.len(), store.load().len());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_verbose_is_set_before_first_load() {
        let storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "{not json").unwrap();

        let store = HistoryStore::open_with_verbose(storage, true);
        assert!(store.is_verbose());
        assert!(store.is_empty());
    }
}
