//! Extension-map persistence for park resources.
//!
//! A resource opts in by implementing [`Saveable`] and calling
//! [`SaveableAppExt::register_saveable`] from its plugin. [`save_park`] then
//! collects every registered resource into a [`ParkSave`] and encodes it with
//! bitcode; [`load_park`] restores them.

use std::collections::BTreeMap;
use std::fmt;

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::banner::BannerRegistry;
use crate::element_locator::unplaced_banners;
use crate::scenery::SceneryRegistry;
use crate::tile_elements::TileElementStore;

/// Current [`ParkSave`] format version.
pub const PARK_SAVE_VERSION: u32 = 1;

/// A resource that persists through the extension map.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Stable key in the extension map.
    const SAVE_KEY: &'static str;

    /// `None` skips the entry, usually because the resource is at its default.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode with bitcode, falling back to `T::default()` with a warning.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, using default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Every registered saveable resource, in registration order.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register `T`. A second registration of the same key is ignored, and
    /// trips a debug assertion.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|entry| entry.key == key) {
            warn!("SaveableRegistry: duplicate key '{}' ignored", key);
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                world.insert_resource(T::load_from_bytes(bytes));
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        self.entries
            .iter()
            .filter_map(|entry| (entry.save_fn)(world).map(|bytes| (entry.key.clone(), bytes)))
            .collect()
    }

    /// Restore every entry present in `extensions`. Absent keys keep their
    /// current value; unknown keys are ignored.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

pub trait SaveableAppExt {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self;
}

impl SaveableAppExt for App {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self {
        self.init_resource::<SaveableRegistry>();
        self.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<T>();
        self
    }
}

// ---------------------------------------------------------------------------
// Park snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ParkSave {
    pub version: u32,
    pub extensions: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug)]
pub enum SaveError {
    /// Bitcode decoding failed (corrupt or truncated data).
    Decode(String),
    /// The snapshot was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
    /// `SaveableRegistry` was never initialised on this world.
    MissingRegistry,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::MissingRegistry => write!(f, "SaveableRegistry is not initialised"),
        }
    }
}

impl std::error::Error for SaveError {}

/// Encode every registered resource.
pub fn save_park(world: &World) -> Result<Vec<u8>, SaveError> {
    let registry = world
        .get_resource::<SaveableRegistry>()
        .ok_or(SaveError::MissingRegistry)?;
    let save = ParkSave {
        version: PARK_SAVE_VERSION,
        extensions: registry.save_all(world),
    };
    info!("saved park: {} extension entries", save.extensions.len());
    Ok(bitcode::encode(&save))
}

/// Reset every registered resource, then restore the ones in `bytes`.
pub fn load_park(world: &mut World, bytes: &[u8]) -> Result<(), SaveError> {
    let save: ParkSave = bitcode::decode(bytes).map_err(|e| SaveError::Decode(e.to_string()))?;
    if save.version > PARK_SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: PARK_SAVE_VERSION,
            found: save.version,
        });
    }
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        registry.reset_all(world);
        registry.load_all(world, &save.extensions);
    });
    info!("loaded park: {} extension entries", save.extensions.len());
    warn_unplaced_banners(world);
    Ok(())
}

/// Tile elements are not part of [`ParkSave`], so banners restored onto a map
/// that lacks their signs cannot be opened or edited.
fn warn_unplaced_banners(world: &World) {
    let (Some(tiles), Some(scenery), Some(banners)) = (
        world.get_resource::<TileElementStore>(),
        world.get_resource::<SceneryRegistry>(),
        world.get_resource::<BannerRegistry>(),
    ) else {
        return;
    };
    let unplaced = unplaced_banners(tiles, scenery, banners);
    if !unplaced.is_empty() {
        warn!(
            "{} of {} loaded banners have no sign on the current map (tile elements are not saved)",
            unplaced.len(),
            banners.len()
        );
    }
}
