//! Data models for decks and cards

use serde::{Deserialize, Serialize};

/// A flashcard with a front and a back side.
///
/// Cards have no stable identity; a card is addressed by its position in the
/// deck's ordered list, and that order is preserved across save/load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    /// Marker set by the user to flag a card for focused review.
    /// Hand-edited import files may omit it; absent means not starred.
    #[serde(default)]
    pub starred: bool,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            starred: false,
        }
    }
}

/// Per-deck language settings, stored as `settings.json` next to the cards.
///
/// Language tags are free-form (the UI offers a closed list, the store does
/// not validate them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSettings {
    pub front_lang: String,
    pub back_lang: String,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            front_lang: "en".to_string(),
            back_lang: "ko".to_string(),
        }
    }
}

/// Reference to a deck as `title/deck`, resolved lazily against the store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRef {
    pub title: String,
    pub deck: String,
}

impl DeckRef {
    pub fn new(title: impl Into<String>, deck: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            deck: deck.into(),
        }
    }
}

impl std::fmt::Display for DeckRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.title, self.deck)
    }
}
