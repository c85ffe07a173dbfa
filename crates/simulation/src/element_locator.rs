//! Resolve a banner id to the sign element that displays it.
//!
//! A sign's visual occupies exactly one slot in the stack at the banner's
//! tile, but it may sit above any number of other elements. The scan walks
//! the stack bottom to top and returns the first element that is of the
//! requested kind, can display text, and carries the banner.

use serde::{Deserialize, Serialize};

use crate::banner::{BannerFlags, BannerId, BannerRegistry};
use crate::colour::Colour;
use crate::config::COORDS_Z_STEP;
use crate::coords::{CoordsXYZ, CoordsXYZD, Direction, TileCoords};
use crate::scenery::SceneryRegistry;
use crate::tile_elements::{TileElement, TileElementKind, TileElementStore};

/// The two scenery kinds that can host a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignKind {
    LargeScenery,
    Wall,
}

impl SignKind {
    pub fn is_large(self) -> bool {
        self == SignKind::LargeScenery
    }

    /// The kind of sign a banner with `flags` was created for.
    pub fn of_banner(flags: BannerFlags) -> SignKind {
        if flags.is_wall {
            SignKind::Wall
        } else {
            SignKind::LargeScenery
        }
    }
}

/// Everything a caller needs to act on a located sign element without
/// holding a borrow of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle {
    pub kind: SignKind,
    pub position: TileCoords,
    pub stack_index: usize,
    pub base_height: u8,
    pub direction: Direction,
    /// Tile sequence within a multi-tile large scenery object; 0 for walls.
    pub sequence: u8,
    pub entry: u16,
    pub primary: Colour,
    pub secondary: Colour,
}

impl ElementHandle {
    pub fn base_z(&self) -> i32 {
        self.base_height as i32 * COORDS_Z_STEP
    }

    pub fn location(&self) -> CoordsXYZD {
        CoordsXYZD::new(self.position.to_coords_xy(), self.base_z(), self.direction)
    }

    /// World position a viewport should centre on.
    pub fn view_position(&self) -> CoordsXYZ {
        CoordsXYZ::new(self.position.to_coords_xy().to_tile_centre(), self.base_z())
    }
}

/// No element on the tile references the banner. Not an error condition for
/// callers: it means there is nothing to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("no sign element references this banner")
    }
}

impl std::error::Error for NotFound {}

/// Find the element at `position` of `kind` that displays `banner_id`.
pub fn locate(
    store: &TileElementStore,
    scenery: &SceneryRegistry,
    position: TileCoords,
    banner_id: BannerId,
    kind: SignKind,
) -> Result<ElementHandle, NotFound> {
    let stack = store.first_element_at(position).ok_or(NotFound)?;
    stack
        .iter()
        .enumerate()
        .find_map(|(stack_index, element)| {
            match_sign(element, scenery, banner_id, kind).map(|(entry, sequence, primary, secondary)| {
                ElementHandle {
                    kind,
                    position,
                    stack_index,
                    base_height: element.base_height,
                    direction: element.direction,
                    sequence,
                    entry,
                    primary,
                    secondary,
                }
            })
        })
        .ok_or(NotFound)
}

/// Banners whose sign cannot be found on their tile.
pub fn unplaced_banners(
    store: &TileElementStore,
    scenery: &SceneryRegistry,
    banners: &BannerRegistry,
) -> Vec<BannerId> {
    banners
        .iter()
        .filter(|banner| {
            locate(store, scenery, banner.position, banner.id, SignKind::of_banner(banner.flags)).is_err()
        })
        .map(|banner| banner.id)
        .collect()
}

/// Returns `(entry, sequence, primary, secondary)` when `element` is a
/// text-capable sign of `kind` carrying `banner_id`.
fn match_sign(
    element: &TileElement,
    scenery: &SceneryRegistry,
    banner_id: BannerId,
    kind: SignKind,
) -> Option<(u16, u8, Colour, Colour)> {
    match (&element.kind, kind) {
        (TileElementKind::LargeScenery(large), SignKind::LargeScenery) => {
            let entry = scenery.large_scenery(large.entry)?;
            (entry.scrolling_mode.is_scrolling() && large.banner == Some(banner_id))
                .then_some((large.entry, large.sequence, large.primary, large.secondary))
        }
        (TileElementKind::Wall(wall), SignKind::Wall) => {
            let entry = scenery.wall(wall.entry)?;
            (entry.scrolling_mode.is_scrolling() && wall.banner == Some(banner_id))
                .then_some((wall.entry, 0, wall.primary, wall.secondary))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenery::builtin;
    use crate::tile_elements::{LargeSceneryElement, WallElement};

    fn wall(entry: u16, base: u8, banner: Option<BannerId>) -> TileElement {
        TileElement::new(
            base,
            base + 3,
            Direction::South,
            TileElementKind::Wall(WallElement {
                entry,
                primary: Colour::BRIGHT_RED,
                secondary: Colour::WHITE,
                tertiary: Colour::BLACK,
                banner,
            }),
        )
    }

    fn large(entry: u16, base: u8, sequence: u8, banner: Option<BannerId>) -> TileElement {
        TileElement::new(
            base,
            base + 6,
            Direction::East,
            TileElementKind::LargeScenery(LargeSceneryElement {
                entry,
                sequence,
                primary: Colour::DARK_GREEN,
                secondary: Colour::YELLOW,
                banner,
            }),
        )
    }

    #[test]
    fn test_unplaced_banners_lists_only_missing_signs() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let mut banners = BannerRegistry::default();
        let wall_flags = BannerFlags {
            is_large_scenery: false,
            is_wall: true,
        };
        let placed = banners.create(TileCoords::new(1, 1), wall_flags).unwrap();
        let missing = banners.create(TileCoords::new(2, 2), wall_flags).unwrap();
        // A billboard carrying a wall banner's id is still the wrong kind.
        let wrong_kind = banners.create(TileCoords::new(3, 3), wall_flags).unwrap();
        store.insert(TileCoords::new(1, 1), wall(builtin::SCROLLING_WALL_SIGN, 0, Some(placed)));
        store.insert(TileCoords::new(3, 3), large(builtin::BILLBOARD, 0, 0, Some(wrong_kind)));

        assert_eq!(unplaced_banners(&store, &scenery, &banners), vec![missing, wrong_kind]);
    }

    #[test]
    fn test_empty_tile_is_not_found() {
        let store = TileElementStore::new(8, 8);
        let scenery = SceneryRegistry::default();
        let result = locate(&store, &scenery, TileCoords::new(3, 3), BannerId(0), SignKind::Wall);
        assert_eq!(result, Err(NotFound));
    }

    #[test]
    fn test_off_map_is_not_found() {
        let store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let result = locate(&store, &scenery, TileCoords::new(-2, 9), BannerId(0), SignKind::LargeScenery);
        assert_eq!(result, Err(NotFound));
    }

    #[test]
    fn test_skips_non_scrolling_wall_with_same_banner() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let tile = TileCoords::new(1, 1);
        store.insert(tile, wall(builtin::WOODEN_FENCE, 2, Some(BannerId(7))));
        store.insert(tile, wall(builtin::SCROLLING_WALL_SIGN, 2, Some(BannerId(7))));

        let handle = locate(&store, &scenery, tile, BannerId(7), SignKind::Wall).unwrap();
        assert_eq!(handle.stack_index, 2);
        assert_eq!(handle.entry, builtin::SCROLLING_WALL_SIGN);
        assert_eq!(handle.location(), CoordsXYZD::new(tile.to_coords_xy(), 16, Direction::South));
    }

    #[test]
    fn test_kind_filter_excludes_other_kind() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let tile = TileCoords::new(2, 2);
        store.insert(tile, large(builtin::BILLBOARD, 2, 0, Some(BannerId(3))));

        assert_eq!(
            locate(&store, &scenery, tile, BannerId(3), SignKind::Wall),
            Err(NotFound)
        );
        let handle = locate(&store, &scenery, tile, BannerId(3), SignKind::LargeScenery).unwrap();
        assert_eq!(handle.kind, SignKind::LargeScenery);
        assert_eq!(handle.primary, Colour::DARK_GREEN);
        assert_eq!(handle.secondary, Colour::YELLOW);
    }

    #[test]
    fn test_lowest_match_wins() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let tile = TileCoords::new(0, 0);
        store.insert(tile, large(builtin::BILLBOARD, 8, 1, Some(BannerId(2))));
        store.insert(tile, large(builtin::BILLBOARD, 4, 0, Some(BannerId(2))));

        let handle = locate(&store, &scenery, tile, BannerId(2), SignKind::LargeScenery).unwrap();
        assert_eq!(handle.base_height, 4);
        assert_eq!(handle.sequence, 0);
    }

    #[test]
    fn test_unknown_entry_is_skipped() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let tile = TileCoords::new(5, 5);
        store.insert(tile, wall(200, 2, Some(BannerId(1))));
        assert_eq!(
            locate(&store, &scenery, tile, BannerId(1), SignKind::Wall),
            Err(NotFound)
        );
    }

    #[test]
    fn test_view_position_is_tile_centre_at_base_z() {
        let mut store = TileElementStore::with_flat_surface(8, 8, true);
        let scenery = SceneryRegistry::default();
        let tile = TileCoords::new(2, 3);
        store.insert(tile, large(builtin::LETTERED_SIGN, 6, 0, Some(BannerId(0))));
        let handle = locate(&store, &scenery, tile, BannerId(0), SignKind::LargeScenery).unwrap();
        assert_eq!(handle.view_position(), CoordsXYZ { x: 80, y: 112, z: 48 });
    }
}
