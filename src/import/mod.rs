//! Deck file import
//!
//! Handles importing card files into the deck store. Supports:
//! - `.json` — an array of card objects (`front`/`back`, optional `starred`)
//! - `.txt` — one `front-back` pair per line, split on the first `-`;
//!   lines without a `-` are ignored
//!
//! The imported deck is named after the file stem and written as a fresh
//! `flashcards.json`; an existing deck of the same name is overwritten.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::decks::{Card, DeckRef, DeckStore, DeckStoreError};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] DeckStoreError),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Where an imported file lands in the deck tree
pub enum ImportDest {
    /// Create a title named after the file, holding one deck of the same name
    NewTitle,
    /// Create a deck named after the file under an existing title
    Title(String),
}

/// Import a card file, returning the destination deck and the card count
pub fn import_file(store: &DeckStore, path: &Path, dest: &ImportDest) -> Result<(DeckRef, usize)> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imported".to_string());

    let cards = parse_file(path)?;

    let deck = match dest {
        ImportDest::NewTitle => DeckRef::new(stem.clone(), stem),
        ImportDest::Title(title) => DeckRef::new(title.clone(), stem),
    };

    store.save_cards(&deck.title, &deck.deck, &cards)?;
    log::info!("imported {} cards into {}", cards.len(), deck);
    Ok((deck, cards.len()))
}

fn parse_file(path: &Path) -> Result<Vec<Card>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;
    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&content)?),
        "txt" => Ok(parse_delimited(&content)),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_delimited(content: &str) -> Vec<Card> {
    content
        .lines()
        .filter_map(|line| line.split_once('-'))
        .map(|(front, back)| Card::new(front.trim(), back.trim()))
        .collect()
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
    fn test_import_txt() {
        let (store, temp) = create_test_store();

        let file = temp.path().join("animals.txt");
        fs::write(&file, "cat-고양이\ndog-개\n").unwrap();

        let (deck, count) = import_file(&store, &file, &ImportDest::NewTitle).unwrap();
        assert_eq!(count, 2);
        assert_eq!(deck, DeckRef::new("animals", "animals"));

        let cards = store.load_cards("animals", "animals").unwrap();
        assert_eq!(cards[0], Card::new("cat", "고양이"));
        assert_eq!(cards[1], Card::new("dog", "개"));
        assert!(cards.iter().all(|c| !c.starred));
    }

    #[test]
    fn test_import_txt_ignores_lines_without_separator() {
        let (store, temp) = create_test_store();

        let file = temp.path().join("mixed.txt");
        fs::write(&file, "cat-고양이\njust a note\n\ndog-개\n").unwrap();

        let (_, count) = import_file(&store, &file, &ImportDest::NewTitle).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_import_json_into_title() {
        let (store, temp) = create_test_store();
        store.create_title("Korean").unwrap();

        let file = temp.path().join("week2.json");
        fs::write(
            &file,
            r#"[{"front": "water", "back": "물", "starred": true},
                {"front": "fire", "back": "불"}]"#,
        )
        .unwrap();

        let (deck, count) =
            import_file(&store, &file, &ImportDest::Title("Korean".into())).unwrap();
        assert_eq!(count, 2);
        assert_eq!(deck, DeckRef::new("Korean", "week2"));

        let cards = store.load_cards("Korean", "week2").unwrap();
        assert!(cards[0].starred);
        assert!(!cards[1].starred);
    }

    #[test]
    fn test_import_unsupported_extension() {
        let (store, temp) = create_test_store();

        let file = temp.path().join("cards.csv");
        fs::write(&file, "cat,고양이").unwrap();

        let err = import_file(&store, &file, &ImportDest::NewTitle).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "csv"));
    }

    #[test]
    fn test_import_malformed_json() {
        let (store, temp) = create_test_store();

        let file = temp.path().join("bad.json");
        fs::write(&file, "{oops").unwrap();

        let err = import_file(&store, &file, &ImportDest::NewTitle).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }
}
