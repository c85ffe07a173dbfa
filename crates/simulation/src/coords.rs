//! Tile and world coordinate types.
//!
//! Tiles are addressed with [`TileCoords`]; world positions use [`CoordsXY`]
//! where one tile spans [`COORDS_XY_STEP`] units. Heights are world units, and
//! tile elements store them divided by [`COORDS_Z_STEP`].

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::{COORDS_XY_HALF_TILE, COORDS_XY_STEP, COORDS_Z_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct TileCoords {
    pub x: i32,
    pub y: i32,
}

impl TileCoords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_coords_xy(self) -> CoordsXY {
        CoordsXY {
            x: self.x * COORDS_XY_STEP,
            y: self.y * COORDS_XY_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub struct CoordsXY {
    pub x: i32,
    pub y: i32,
}

impl CoordsXY {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_tile_coords(self) -> TileCoords {
        TileCoords {
            x: self.x.div_euclid(COORDS_XY_STEP),
            y: self.y.div_euclid(COORDS_XY_STEP),
        }
    }

    /// Snap to the tile's corner, then move to its centre.
    pub fn to_tile_centre(self) -> CoordsXY {
        let corner = self.to_tile_coords().to_coords_xy();
        CoordsXY {
            x: corner.x + COORDS_XY_HALF_TILE,
            y: corner.y + COORDS_XY_HALF_TILE,
        }
    }

    /// Rotate an offset clockwise by `direction` quarter turns.
    pub fn rotate(self, direction: Direction) -> CoordsXY {
        match direction {
            Direction::West => self,
            Direction::North => CoordsXY::new(self.y, -self.x),
            Direction::East => CoordsXY::new(-self.x, -self.y),
            Direction::South => CoordsXY::new(-self.y, self.x),
        }
    }

    pub fn offset(self, other: CoordsXY) -> CoordsXY {
        CoordsXY::new(self.x + other.x, self.y + other.y)
    }

    pub fn difference(self, other: CoordsXY) -> CoordsXY {
        CoordsXY::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub struct CoordsXYZ {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CoordsXYZ {
    pub fn new(xy: CoordsXY, z: i32) -> Self {
        Self { x: xy.x, y: xy.y, z }
    }

    pub fn xy(self) -> CoordsXY {
        CoordsXY::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub struct CoordsXYZD {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: Direction,
}

impl CoordsXYZD {
    pub fn new(xy: CoordsXY, z: i32, direction: Direction) -> Self {
        Self {
            x: xy.x,
            y: xy.y,
            z,
            direction,
        }
    }

    pub fn xy(self) -> CoordsXY {
        CoordsXY::new(self.x, self.y)
    }

    pub fn tile(self) -> TileCoords {
        self.xy().to_tile_coords()
    }

    /// Height in tile-element units. Heights that are not a multiple of the
    /// step, or do not fit an element, yield `None`.
    pub fn base_height(self) -> Option<u8> {
        if self.z < 0 || self.z % COORDS_Z_STEP != 0 {
            return None;
        }
        u8::try_from(self.z / COORDS_Z_STEP).ok()
    }
}

/// Facing of an element; also the rotation applied to multi-tile offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub enum Direction {
    #[default]
    West,
    North,
    East,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    pub fn from_index(index: u8) -> Direction {
        Self::ALL[(index & 3) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn rotate(self, offset: u8) -> Direction {
        Direction::from_index(self.index().wrapping_add(offset))
    }
}
