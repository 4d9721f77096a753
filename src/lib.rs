use std::sync::Arc;

pub mod cards;
pub mod config;
pub mod decks;
pub mod import;
pub mod tts;

use cards::CardCollection;
use config::Config;
use decks::{DeckRef, DeckStore, DeckStoreError};
use tts::Speaker;

/// Explicit application context passed to frontends.
///
/// Owns the deck store, the speech dispatcher and the collection of the
/// currently selected deck. Replaces ambient global state: everything a
/// screen needs travels through this object.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<DeckStore>,
    pub speaker: Speaker,
    collection: Option<CardCollection>,
}

impl AppContext {
    /// Initialize from the default data directory
    pub fn init() -> Result<Self, DeckStoreError> {
        let data_dir = DeckStore::default_data_dir()?;
        Self::init_at(data_dir)
    }

    /// Initialize from an explicit data directory
    pub fn init_at(data_dir: std::path::PathBuf) -> Result<Self, DeckStoreError> {
        let config = Config::load(&data_dir);
        let data_dir = config.data_dir.clone().unwrap_or(data_dir);

        let store = Arc::new(DeckStore::new(data_dir));
        store.init()?;

        let speaker = Speaker::new(tts::select_backend(&config.tts));

        Ok(Self {
            config,
            store,
            speaker,
            collection: None,
        })
    }

    /// Select the active deck, loading its cards.
    ///
    /// A corrupt card file leaves the collection empty and returns the load
    /// error once so the frontend can notify the user.
    pub fn open_deck(&mut self, deck: DeckRef) -> Option<DeckStoreError> {
        let (collection, notice) = CardCollection::open(Arc::clone(&self.store), deck);
        self.collection = Some(collection);
        notice
    }

    pub fn collection(&self) -> Option<&CardCollection> {
        self.collection.as_ref()
    }

    pub fn collection_mut(&mut self) -> Option<&mut CardCollection> {
        self.collection.as_mut()
    }
}
