//! Data types shared by the indexer, navigation and editing layers.

mod coordinate;
mod dimension;

pub use coordinate::*;
pub use dimension::*;
