//! Tile element variants stacked on a map tile.

use serde::{Deserialize, Serialize};

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::config::COORDS_Z_STEP;
use crate::coords::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileElementType {
    Surface,
    Path,
    Track,
    SmallScenery,
    Entrance,
    Wall,
    LargeScenery,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallElement {
    pub entry: u16,
    pub primary: Colour,
    pub secondary: Colour,
    pub tertiary: Colour,
    pub banner: Option<BannerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeSceneryElement {
    pub entry: u16,
    /// Which tile of the multi-tile object this element is.
    pub sequence: u8,
    pub primary: Colour,
    pub secondary: Colour,
    pub banner: Option<BannerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileElementKind {
    Surface { owned: bool },
    Path { entry: u16 },
    Track { ride_index: u16, sequence: u8 },
    SmallScenery { entry: u16, primary: Colour, secondary: Colour },
    Entrance { ride_index: u16 },
    Wall(WallElement),
    LargeScenery(LargeSceneryElement),
    Banner { banner: BannerId, edge: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileElement {
    pub base_height: u8,
    pub clearance_height: u8,
    pub direction: Direction,
    pub ghost: bool,
    pub kind: TileElementKind,
}

impl TileElement {
    pub fn new(base_height: u8, clearance_height: u8, direction: Direction, kind: TileElementKind) -> Self {
        Self {
            base_height,
            clearance_height,
            direction,
            ghost: false,
            kind,
        }
    }

    pub fn surface(base_height: u8, owned: bool) -> Self {
        Self::new(base_height, base_height, Direction::West, TileElementKind::Surface { owned })
    }

    pub fn element_type(&self) -> TileElementType {
        match self.kind {
            TileElementKind::Surface { .. } => TileElementType::Surface,
            TileElementKind::Path { .. } => TileElementType::Path,
            TileElementKind::Track { .. } => TileElementType::Track,
            TileElementKind::SmallScenery { .. } => TileElementType::SmallScenery,
            TileElementKind::Entrance { .. } => TileElementType::Entrance,
            TileElementKind::Wall(_) => TileElementType::Wall,
            TileElementKind::LargeScenery(_) => TileElementType::LargeScenery,
            TileElementKind::Banner { .. } => TileElementType::Banner,
        }
    }

    pub fn base_z(&self) -> i32 {
        self.base_height as i32 * COORDS_Z_STEP
    }

    pub fn as_wall(&self) -> Option<&WallElement> {
        match &self.kind {
            TileElementKind::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    pub fn as_wall_mut(&mut self) -> Option<&mut WallElement> {
        match &mut self.kind {
            TileElementKind::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    pub fn as_large_scenery(&self) -> Option<&LargeSceneryElement> {
        match &self.kind {
            TileElementKind::LargeScenery(scenery) => Some(scenery),
            _ => None,
        }
    }

    pub fn as_large_scenery_mut(&mut self) -> Option<&mut LargeSceneryElement> {
        match &mut self.kind {
            TileElementKind::LargeScenery(scenery) => Some(scenery),
            _ => None,
        }
    }

    /// Banner carried by this element, for the kinds that can carry one.
    pub fn banner(&self) -> Option<BannerId> {
        match &self.kind {
            TileElementKind::Wall(wall) => wall.banner,
            TileElementKind::LargeScenery(scenery) => scenery.banner,
            TileElementKind::Banner { banner, .. } => Some(*banner),
            _ => None,
        }
    }

    pub fn is_owned_surface(&self) -> bool {
        matches!(self.kind, TileElementKind::Surface { owned: true })
    }
}
