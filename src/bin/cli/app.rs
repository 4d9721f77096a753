use std::path::PathBuf;

use anyhow::{Context, Result};

use wordbook::decks::DeckRef;
use wordbook::AppContext;

/// Shared application state for CLI commands
pub struct App {
    pub ctx: AppContext,
}

impl App {
    /// Initialize from the default (or overridden) data directory
    pub fn new(data_dir: Option<&str>) -> Result<Self> {
        let ctx = match data_dir {
            Some(dir) => AppContext::init_at(PathBuf::from(dir)),
            None => AppContext::init(),
        }
        .context("Failed to initialize deck store")?;

        Ok(Self { ctx })
    }

    /// Select the active deck, surfacing a corrupt card file as a warning
    /// instead of an error (the deck simply starts empty).
    pub fn open_deck(&mut self, title: &str, deck: &str) {
        if let Some(notice) = self.ctx.open_deck(DeckRef::new(title, deck)) {
            eprintln!(
                "Warning: card file is corrupted, starting empty ({})",
                notice
            );
        }
    }
}
