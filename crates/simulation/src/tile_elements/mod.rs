//! Tile element store: the stacked structures occupying each map tile.

pub mod store;
pub mod types;

pub use store::TileElementStore;
pub use types::{LargeSceneryElement, TileElement, TileElementKind, TileElementType, WallElement};
