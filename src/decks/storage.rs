//! Storage operations for the deck tree
//!
//! Directory structure:
//! ```text
//! <data_dir>/decks/
//! ├── {title}/                  # top-level grouping of decks
//! │   └── {deck}/
//! │       ├── flashcards.json   # ordered array of cards
//! │       └── settings.json     # per-deck language settings (optional)
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use super::models::{Card, DeckSettings};

#[derive(Error, Debug)]
pub enum DeckStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Corrupt card file {path}: {source}")]
    CorruptData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, DeckStoreError>;

/// Filesystem-backed store for titles, decks and their card lists
pub struct DeckStore {
    base_path: PathBuf,
}

impl DeckStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordbook"))
            .ok_or(DeckStoreError::DataDirNotFound)
    }

    /// Initialize the deck tree root
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.decks_dir())?;
        Ok(())
    }

    fn decks_dir(&self) -> PathBuf {
        self.base_path.join("decks")
    }

    fn title_dir(&self, title: &str) -> PathBuf {
        self.decks_dir().join(title)
    }

    fn deck_dir(&self, title: &str, deck: &str) -> PathBuf {
        self.title_dir(title).join(deck)
    }

    fn cards_path(&self, title: &str, deck: &str) -> PathBuf {
        self.deck_dir(title, deck).join("flashcards.json")
    }

    fn settings_path(&self, title: &str, deck: &str) -> PathBuf {
        self.deck_dir(title, deck).join("settings.json")
    }

    /// List subdirectories of a directory, in filesystem enumeration order
    fn list_subdirs(dir: &PathBuf) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    // ==================== Title Operations ====================

    /// List all titles (enumeration order is platform-dependent, not sorted)
    pub fn list_titles(&self) -> Result<Vec<String>> {
        Self::list_subdirs(&self.decks_dir())
    }

    /// Create a new empty title
    pub fn create_title(&self, name: &str) -> Result<()> {
        let dir = self.title_dir(name);
        if dir.exists() {
            return Err(DeckStoreError::AlreadyExists(name.to_string()));
        }
        fs::create_dir_all(&dir)?;
        log::debug!("created title directory {:?}", dir);
        Ok(())
    }

    /// Delete a title and every deck under it; missing title is a no-op
    pub fn delete_title(&self, name: &str) -> Result<()> {
        let dir = self.title_dir(name);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    // ==================== Deck Operations ====================

    /// List all decks under a title
    pub fn list_decks(&self, title: &str) -> Result<Vec<String>> {
        Self::list_subdirs(&self.title_dir(title))
    }

    /// Create a new deck with its language settings
    pub fn create_deck(&self, title: &str, name: &str, settings: &DeckSettings) -> Result<()> {
        let dir = self.deck_dir(title, name);
        if dir.exists() {
            return Err(DeckStoreError::AlreadyExists(format!("{}/{}", title, name)));
        }
        fs::create_dir_all(&dir)?;
        self.save_settings(title, name, settings)?;
        log::debug!("created deck directory {:?}", dir);
        Ok(())
    }

    /// Delete a deck; irreversible, missing deck is a no-op
    pub fn delete_deck(&self, title: &str, name: &str) -> Result<()> {
        let dir = self.deck_dir(title, name);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    // ==================== Card Operations ====================

    /// Load the card list of a deck.
    ///
    /// An absent file is an empty deck. An unparseable file is reported as
    /// `CorruptData`; the caller decides whether to continue with an empty
    /// collection.
    pub fn load_cards(&self, title: &str, deck: &str) -> Result<Vec<Card>> {
        let path = self.cards_path(title, deck);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let cards: Vec<Card> = serde_json::from_str(&content)
            .map_err(|source| DeckStoreError::CorruptData { path, source })?;
        Ok(cards)
    }

    /// Save the full card list of a deck.
    ///
    /// Writes to a temp file in the deck directory and renames it over
    /// `flashcards.json`, so a crash mid-write never leaves a torn file.
    pub fn save_cards(&self, title: &str, deck: &str, cards: &[Card]) -> Result<()> {
        let dir = self.deck_dir(title, deck);
        fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(cards)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(self.cards_path(title, deck))
            .map_err(|e| DeckStoreError::Io(e.error))?;

        log::debug!("saved {} cards to {}/{}", cards.len(), title, deck);
        Ok(())
    }

    // ==================== Settings Operations ====================

    /// Load a deck's language settings, if the settings file exists
    pub fn load_settings(&self, title: &str, deck: &str) -> Result<Option<DeckSettings>> {
        let path = self.settings_path(title, deck);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let settings: DeckSettings = serde_json::from_str(&content)?;
        Ok(Some(settings))
    }

    /// Write a deck's language settings
    pub fn save_settings(&self, title: &str, deck: &str, settings: &DeckSettings) -> Result<()> {
        let dir = self.deck_dir(title, deck);
        fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_path(title, deck), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (DeckStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DeckStore::new(temp_dir.path().to_path_buf());
        store.init().unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_create_and_list_titles() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        store.create_title("French").unwrap();

        let mut titles = store.list_titles().unwrap();
        titles.sort();
        assert_eq!(titles, vec!["French", "Korean"]);
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        let err = store.create_title("Korean").unwrap_err();
        assert!(matches!(err, DeckStoreError::AlreadyExists(_)));

        // The filesystem is unchanged: still exactly one title
        assert_eq!(store.list_titles().unwrap().len(), 1);
    }

    #[test]
    fn test_create_deck_writes_settings() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        let settings = DeckSettings {
            front_lang: "en".into(),
            back_lang: "ko".into(),
        };
        store.create_deck("Korean", "Week 1", &settings).unwrap();

        assert_eq!(store.list_decks("Korean").unwrap(), vec!["Week 1"]);
        let loaded = store.load_settings("Korean", "Week 1").unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_duplicate_deck_rejected() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        let settings = DeckSettings::default();
        store.create_deck("Korean", "Week 1", &settings).unwrap();
        let err = store.create_deck("Korean", "Week 1", &settings).unwrap_err();
        assert!(matches!(err, DeckStoreError::AlreadyExists(_)));
    }

    #[test]
    fn test_cards_round_trip_preserves_order() {
        let (store, _temp) = create_test_store();

        let cards = vec![
            Card::new("cat", "고양이"),
            Card::new("dog", "개"),
            Card {
                front: "bird".into(),
                back: "새".into(),
                starred: true,
            },
        ];
        store.save_cards("Korean", "Animals", &cards).unwrap();

        let loaded = store.load_cards("Korean", "Animals").unwrap();
        assert_eq!(loaded, cards);
    }

    #[test]
    fn test_load_missing_cards_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load_cards("Nope", "Nothing").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_cards_reported() {
        let (store, temp) = create_test_store();

        let dir = temp.path().join("decks/Korean/Broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("flashcards.json"), "{not json").unwrap();

        let err = store.load_cards("Korean", "Broken").unwrap_err();
        assert!(matches!(err, DeckStoreError::CorruptData { .. }));
    }

    #[test]
    fn test_missing_starred_defaults_to_false() {
        let (store, temp) = create_test_store();

        let dir = temp.path().join("decks/Korean/Old");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("flashcards.json"),
            r#"[{"front": "cat", "back": "고양이"}]"#,
        )
        .unwrap();

        let cards = store.load_cards("Korean", "Old").unwrap();
        assert_eq!(cards.len(), 1);
        assert!(!cards[0].starred);
    }

    #[test]
    fn test_delete_deck_and_noop() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        store
            .create_deck("Korean", "Week 1", &DeckSettings::default())
            .unwrap();
        store.delete_deck("Korean", "Week 1").unwrap();
        assert!(store.list_decks("Korean").unwrap().is_empty());

        // Deleting again is a silent no-op
        store.delete_deck("Korean", "Week 1").unwrap();
    }

    #[test]
    fn test_delete_title_removes_decks() {
        let (store, _temp) = create_test_store();

        store.create_title("Korean").unwrap();
        store
            .create_deck("Korean", "Week 1", &DeckSettings::default())
            .unwrap();
        store.delete_title("Korean").unwrap();
        assert!(store.list_titles().unwrap().is_empty());
    }
}
