//! Immutable scenery definitions, loaded once from content files.
//!
//! Tile elements store an entry index; the definition says which colours the
//! piece exposes, whether it can display banner text, and (for large scenery)
//! which tiles it covers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::coords::CoordsXY;

/// How a scenery piece displays its banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollingMode {
    #[default]
    None,
    Fixed,
    Marquee,
}

impl ScrollingMode {
    pub fn is_scrolling(self) -> bool {
        self != ScrollingMode::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeSceneryFlags {
    pub has_primary_colour: bool,
    pub has_secondary_colour: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallFlags {
    pub has_primary_colour: bool,
    pub has_secondary_colour: bool,
    pub has_tertiary_colour: bool,
}

/// One tile of a multi-tile large scenery object, relative to its origin
/// before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeSceneryTile {
    pub offset: CoordsXY,
    #[serde(default)]
    pub z_offset: i32,
    /// Clearance above the tile's base, in world units.
    pub clearance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeSceneryEntry {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub flags: LargeSceneryFlags,
    #[serde(default)]
    pub scrolling_mode: ScrollingMode,
    pub tiles: Vec<LargeSceneryTile>,
    pub price: i64,
    /// Cost charged on removal; negative values are refunds.
    pub removal_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallEntry {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub flags: WallFlags,
    #[serde(default)]
    pub scrolling_mode: ScrollingMode,
    /// Height in world units.
    pub height: i32,
    pub price: i64,
}

/// A single content file: one definition, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneryDefinition {
    LargeScenery(LargeSceneryEntry),
    Wall(WallEntry),
}

impl SceneryDefinition {
    pub fn identifier(&self) -> &str {
        match self {
            SceneryDefinition::LargeScenery(entry) => &entry.identifier,
            SceneryDefinition::Wall(entry) => &entry.identifier,
        }
    }
}

// ---------------------------------------------------------------------------
// SceneryRegistry resource
// ---------------------------------------------------------------------------

/// Index tables for scenery definitions. Indices are stable for the lifetime
/// of a loaded park; tile elements refer to entries by index.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SceneryRegistry {
    large_scenery: Vec<LargeSceneryEntry>,
    walls: Vec<WallEntry>,
}

impl SceneryRegistry {
    pub fn empty() -> Self {
        Self {
            large_scenery: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Add a definition, returning its index in the matching table. A
    /// definition whose identifier is already present replaces nothing and
    /// returns the existing index.
    pub fn add(&mut self, definition: SceneryDefinition) -> u16 {
        match definition {
            SceneryDefinition::LargeScenery(entry) => self.add_large_scenery(entry),
            SceneryDefinition::Wall(entry) => self.add_wall(entry),
        }
    }

    pub fn add_large_scenery(&mut self, entry: LargeSceneryEntry) -> u16 {
        if let Some(existing) = self.large_scenery_index(&entry.identifier) {
            warn!("SceneryRegistry: duplicate large scenery '{}' ignored", entry.identifier);
            return existing;
        }
        self.large_scenery.push(entry);
        (self.large_scenery.len() - 1) as u16
    }

    pub fn add_wall(&mut self, entry: WallEntry) -> u16 {
        if let Some(existing) = self.wall_index(&entry.identifier) {
            warn!("SceneryRegistry: duplicate wall '{}' ignored", entry.identifier);
            return existing;
        }
        self.walls.push(entry);
        (self.walls.len() - 1) as u16
    }

    pub fn large_scenery(&self, index: u16) -> Option<&LargeSceneryEntry> {
        self.large_scenery.get(index as usize)
    }

    pub fn wall(&self, index: u16) -> Option<&WallEntry> {
        self.walls.get(index as usize)
    }

    pub fn large_scenery_index(&self, identifier: &str) -> Option<u16> {
        self.large_scenery
            .iter()
            .position(|entry| entry.identifier == identifier)
            .map(|index| index as u16)
    }

    pub fn wall_index(&self, identifier: &str) -> Option<u16> {
        self.walls
            .iter()
            .position(|entry| entry.identifier == identifier)
            .map(|index| index as u16)
    }

    pub fn large_scenery_count(&self) -> usize {
        self.large_scenery.len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

/// The built-in scenery set used when no content directory is configured.
impl Default for SceneryRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.add_large_scenery(LargeSceneryEntry {
            identifier: "park.large.billboard".to_string(),
            name: "Billboard".to_string(),
            flags: LargeSceneryFlags {
                has_primary_colour: true,
                has_secondary_colour: true,
            },
            scrolling_mode: ScrollingMode::Marquee,
            tiles: vec![
                LargeSceneryTile {
                    offset: CoordsXY::new(0, 0),
                    z_offset: 0,
                    clearance: 48,
                },
                LargeSceneryTile {
                    offset: CoordsXY::new(0, 32),
                    z_offset: 0,
                    clearance: 48,
                },
            ],
            price: 120,
            removal_price: -60,
        });
        registry.add_large_scenery(LargeSceneryEntry {
            identifier: "park.large.statue".to_string(),
            name: "Statue".to_string(),
            flags: LargeSceneryFlags {
                has_primary_colour: true,
                has_secondary_colour: false,
            },
            scrolling_mode: ScrollingMode::None,
            tiles: vec![LargeSceneryTile {
                offset: CoordsXY::new(0, 0),
                z_offset: 0,
                clearance: 64,
            }],
            price: 250,
            removal_price: -125,
        });
        registry.add_large_scenery(LargeSceneryEntry {
            identifier: "park.large.lettered_sign".to_string(),
            name: "3D Lettered Sign".to_string(),
            flags: LargeSceneryFlags {
                has_primary_colour: true,
                has_secondary_colour: false,
            },
            scrolling_mode: ScrollingMode::Fixed,
            tiles: vec![LargeSceneryTile {
                offset: CoordsXY::new(0, 0),
                z_offset: 0,
                clearance: 32,
            }],
            price: 60,
            removal_price: -30,
        });
        registry.add_wall(WallEntry {
            identifier: "park.wall.wooden_fence".to_string(),
            name: "Wooden Fence".to_string(),
            flags: WallFlags {
                has_primary_colour: true,
                ..Default::default()
            },
            scrolling_mode: ScrollingMode::None,
            height: 16,
            price: 10,
        });
        registry.add_wall(WallEntry {
            identifier: "park.wall.scrolling_sign".to_string(),
            name: "Scrolling Wall Sign".to_string(),
            flags: WallFlags {
                has_primary_colour: true,
                has_secondary_colour: true,
                has_tertiary_colour: false,
            },
            scrolling_mode: ScrollingMode::Marquee,
            height: 24,
            price: 40,
        });
        registry
    }
}

/// Built-in entry indices, stable for [`SceneryRegistry::default`].
pub mod builtin {
    pub const BILLBOARD: u16 = 0;
    pub const STATUE: u16 = 1;
    pub const LETTERED_SIGN: u16 = 2;
    pub const WOODEN_FENCE: u16 = 0;
    pub const SCROLLING_WALL_SIGN: u16 = 1;
}
