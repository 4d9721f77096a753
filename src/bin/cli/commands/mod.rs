pub mod cards;
pub mod decks;
pub mod import;
pub mod speak;
