use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Saveable;

pub const MAP_WIDTH: usize = 256;
pub const MAP_HEIGHT: usize = 256;

/// World units per tile edge. Tile (1, 2) starts at world (32, 64).
pub const COORDS_XY_STEP: i32 = 32;
pub const COORDS_XY_HALF_TILE: i32 = COORDS_XY_STEP / 2;
/// World units per base-height step of a tile element.
pub const COORDS_Z_STEP: i32 = 8;

/// Upper bound on live banners; banner ids are slot indices below this.
pub const MAX_BANNERS: usize = 250;
/// Maximum characters accepted for a sign's text.
pub const SIGN_TEXT_MAX_LENGTH: usize = 32;

pub const MAX_ENTRANCE_FEE: i64 = 200;
pub const STARTING_CASH: i64 = 10_000;

/// Sign window viewport widget, relative to the window origin.
pub const SIGN_VIEWPORT_LEFT: i32 = 3;
pub const SIGN_VIEWPORT_TOP: i32 = 17;
pub const SIGN_VIEWPORT_WIDTH: i32 = 85;
pub const SIGN_VIEWPORT_HEIGHT: i32 = 60;
pub const SIGN_VIEWPORT_ZOOM: i8 = 0;

// ---------------------------------------------------------------------------
// GeneralConfig resource
// ---------------------------------------------------------------------------

/// Player-facing preferences that affect how windows present the world.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct GeneralConfig {
    /// Draw tile gridlines in every viewport a window creates.
    pub always_show_gridlines: bool,
    /// Directory scanned for scenery definitions at startup. `None` keeps the
    /// built-in scenery set.
    pub content_dir: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            always_show_gridlines: false,
            content_dir: None,
        }
    }
}

impl GeneralConfig {
    /// Parse a JSON config document. Missing fields fall back to defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Saveable for GeneralConfig {
    const SAVE_KEY: &'static str = "general_config";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}
