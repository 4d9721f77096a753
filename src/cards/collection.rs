//! In-memory card list for the active deck
//!
//! Every mutation is persisted immediately through the deck store as a full
//! rewrite of `flashcards.json`; there is no batching or dirty flag. The
//! collection also carries the review cursor used by study frontends.

use std::sync::Arc;

use thiserror::Error;

use crate::decks::{Card, DeckRef, DeckStore, DeckStoreError};

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Card index {index} out of range (len {len})")]
    Index { index: usize, len: usize },

    #[error(transparent)]
    Store(#[from] DeckStoreError),
}

pub type Result<T> = std::result::Result<T, CardError>;

/// The active deck's ordered card list plus the review cursor
pub struct CardCollection {
    store: Arc<DeckStore>,
    deck: DeckRef,
    cards: Vec<Card>,
    cursor: usize,
}

impl CardCollection {
    /// Open the collection for a deck.
    ///
    /// A corrupt card file yields an empty collection together with the load
    /// error, so the caller can notify the user once and carry on.
    pub fn open(store: Arc<DeckStore>, deck: DeckRef) -> (Self, Option<DeckStoreError>) {
        let (cards, notice) = match store.load_cards(&deck.title, &deck.deck) {
            Ok(cards) => (cards, None),
            Err(e) => {
                log::warn!("failed to load cards for {}: {}", deck, e);
                (Vec::new(), Some(e))
            }
        };

        (
            Self {
                store,
                deck,
                cards,
                cursor: 0,
            },
            notice,
        )
    }

    pub fn deck(&self) -> &DeckRef {
        &self.deck
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards flagged for focused review
    pub fn starred_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.starred)
    }

    fn persist(&self) -> Result<()> {
        self.store
            .save_cards(&self.deck.title, &self.deck.deck, &self.cards)?;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cards.len() {
            return Err(CardError::Index {
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }

    // ==================== Mutations ====================

    /// Append a card. Both sides are trimmed and must be non-empty.
    pub fn add(&mut self, front: &str, back: &str, starred: bool) -> Result<()> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() || back.is_empty() {
            return Err(CardError::Validation(
                "both front and back are required".to_string(),
            ));
        }

        self.cards.push(Card {
            front: front.to_string(),
            back: back.to_string(),
            starred,
        });
        self.persist()
    }

    /// Add one card per input line of the form `front-back`.
    ///
    /// Only the first `-` splits; lines without a `-` are skipped. Returns
    /// the number of cards added.
    pub fn bulk_add(&mut self, raw_text: &str) -> Result<usize> {
        let mut added = 0;
        for line in raw_text.lines() {
            if let Some((front, back)) = line.split_once('-') {
                self.cards.push(Card::new(front.trim(), back.trim()));
                added += 1;
            }
        }

        if added > 0 {
            self.persist()?;
        }
        Ok(added)
    }

    /// Replace both sides of a card in place
    pub fn edit(&mut self, index: usize, front: &str, back: &str) -> Result<()> {
        self.check_index(index)?;
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() || back.is_empty() {
            return Err(CardError::Validation(
                "both front and back are required".to_string(),
            ));
        }

        self.cards[index].front = front.to_string();
        self.cards[index].back = back.to_string();
        self.persist()
    }

    /// Remove a card. The cursor clamps back into range if the removal left
    /// it past the end.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.cards.remove(index);
        if self.cursor >= self.cards.len() {
            self.cursor = self.cards.len().saturating_sub(1);
        }
        self.persist()
    }

    pub fn toggle_star(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.cards[index].starred = !self.cards[index].starred;
        self.persist()
    }

    // ==================== Cursor ====================

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Card under the cursor, if any
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    /// Advance the cursor, wrapping past the end; no-op on an empty deck
    pub fn next(&mut self) {
        if !self.cards.is_empty() {
            self.cursor = (self.cursor + 1) % self.cards.len();
        }
    }

    /// Step the cursor back, wrapping before the start; no-op on an empty deck
    pub fn prev(&mut self) {
        if !self.cards.is_empty() {
            self.cursor = (self.cursor + self.cards.len() - 1) % self.cards.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_collection() -> (CardCollection, Arc<DeckStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(DeckStore::new(temp_dir.path().to_path_buf()));
        store.init().unwrap();
        let (collection, notice) =
            CardCollection::open(Arc::clone(&store), DeckRef::new("Korean", "Week 1"));
        assert!(notice.is_none());
        (collection, store, temp_dir)
    }

    #[test]
    fn test_add_persists_last_card() {
        let (mut coll, store, _temp) = create_test_collection();

        coll.add("cat", "고양이", false).unwrap();
        coll.add("  dog  ", " 개 ", false).unwrap();

        let loaded = store.load_cards("Korean", "Week 1").unwrap();
        assert_eq!(loaded.last().unwrap(), &Card::new("dog", "개"));
    }

    #[test]
    fn test_add_rejects_empty_sides() {
        let (mut coll, _store, _temp) = create_test_collection();

        assert!(matches!(
            coll.add("   ", "meaning", false),
            Err(CardError::Validation(_))
        ));
        assert!(matches!(
            coll.add("word", "", false),
            Err(CardError::Validation(_))
        ));
        assert!(coll.is_empty());
    }

    #[test]
    fn test_bulk_add_skips_lines_without_separator() {
        let (mut coll, _store, _temp) = create_test_collection();

        let added = coll.bulk_add("a-1\nb-2\nnodash").unwrap();
        assert_eq!(added, 2);
        assert_eq!(coll.cards()[0], Card::new("a", "1"));
        assert_eq!(coll.cards()[1], Card::new("b", "2"));
    }

    #[test]
    fn test_bulk_add_splits_on_first_separator_only() {
        let (mut coll, _store, _temp) = create_test_collection();

        coll.bulk_add("well-known - 잘 알려진").unwrap();
        assert_eq!(coll.cards()[0].front, "well");
        assert_eq!(coll.cards()[0].back, "known - 잘 알려진");
    }

    #[test]
    fn test_edit_in_place() {
        let (mut coll, store, _temp) = create_test_collection();

        coll.add("cat", "고양이", true).unwrap();
        coll.edit(0, "cat ", " 고양이 (명사)").unwrap();

        let loaded = store.load_cards("Korean", "Week 1").unwrap();
        assert_eq!(loaded[0].back, "고양이 (명사)");
        // Editing does not touch the star
        assert!(loaded[0].starred);
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let (mut coll, store, _temp) = create_test_collection();

        coll.add("a", "1", false).unwrap();
        coll.add("b", "2", false).unwrap();
        coll.add("c", "3", false).unwrap();
        coll.next();
        coll.next();
        assert_eq!(coll.cursor(), 2);

        coll.delete(2).unwrap();
        assert_eq!(coll.cursor(), 1);

        let loaded = store.load_cards("Korean", "Week 1").unwrap();
        assert!(loaded.iter().all(|c| c.front != "c"));
    }

    #[test]
    fn test_delete_last_card_resets_cursor() {
        let (mut coll, _store, _temp) = create_test_collection();

        coll.add("a", "1", false).unwrap();
        coll.delete(0).unwrap();
        assert_eq!(coll.cursor(), 0);
        assert!(coll.current().is_none());
    }

    #[test]
    fn test_delete_out_of_range() {
        let (mut coll, _store, _temp) = create_test_collection();

        coll.add("a", "1", false).unwrap();
        assert!(matches!(
            coll.delete(5),
            Err(CardError::Index { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_toggle_star_round_trips() {
        let (mut coll, store, _temp) = create_test_collection();

        coll.add("a", "1", false).unwrap();
        coll.toggle_star(0).unwrap();
        assert!(store.load_cards("Korean", "Week 1").unwrap()[0].starred);

        coll.toggle_star(0).unwrap();
        assert!(!store.load_cards("Korean", "Week 1").unwrap()[0].starred);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let (mut coll, _store, _temp) = create_test_collection();

        coll.add("a", "1", false).unwrap();
        coll.add("b", "2", false).unwrap();

        coll.prev();
        assert_eq!(coll.current().unwrap().front, "b");
        coll.next();
        assert_eq!(coll.current().unwrap().front, "a");
    }

    #[test]
    fn test_cursor_noop_on_empty() {
        let (mut coll, _store, _temp) = create_test_collection();
        coll.next();
        coll.prev();
        assert_eq!(coll.cursor(), 0);
        assert!(coll.current().is_none());
    }

    #[test]
    fn test_open_corrupt_deck_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(DeckStore::new(temp_dir.path().to_path_buf()));
        store.init().unwrap();

        let dir = temp_dir.path().join("decks/Korean/Broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("flashcards.json"), "]]]").unwrap();

        let (coll, notice) = CardCollection::open(store, DeckRef::new("Korean", "Broken"));
        assert!(coll.is_empty());
        assert!(matches!(notice, Some(DeckStoreError::CorruptData { .. })));
    }

    #[test]
    fn test_starred_cards_filter() {
        let (mut coll, _store, _temp) = create_test_collection();

        coll.add("a", "1", true).unwrap();
        coll.add("b", "2", false).unwrap();
        coll.add("c", "3", true).unwrap();

        let starred: Vec<_> = coll.starred_cards().map(|c| c.front.as_str()).collect();
        assert_eq!(starred, vec!["a", "c"]);
    }
}
