pub mod models;
pub mod storage;

pub use models::{Card, DeckRef, DeckSettings};
pub use storage::{DeckStore, DeckStoreError};
