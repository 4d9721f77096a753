pub mod collection;

pub use collection::{CardCollection, CardError};
