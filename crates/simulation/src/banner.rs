//! Banner records: the named, styled text attached to sign scenery.
//!
//! A banner is created when a scrolling-text scenery piece is placed and
//! destroyed when that piece is removed. Tile elements refer to it by
//! [`BannerId`]; the record itself lives in the [`BannerRegistry`].

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::config::MAX_BANNERS;
use crate::coords::TileCoords;
use crate::Saveable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode)]
pub struct BannerId(pub u16);

impl std::fmt::Display for BannerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of scenery owns the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct BannerFlags {
    pub is_large_scenery: bool,
    pub is_wall: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Banner {
    pub id: BannerId,
    pub position: TileCoords,
    pub text: String,
    pub colour: Colour,
    pub text_colour: Colour,
    pub flags: BannerFlags,
}

impl Banner {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Slot-indexed banner storage. A freed slot is reused by the next banner.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerRegistry {
    slots: Vec<Option<Banner>>,
}

impl BannerRegistry {
    /// Allocate a banner at `position`. Returns `None` when every slot up to
    /// [`MAX_BANNERS`] is taken.
    pub fn create(&mut self, position: TileCoords, flags: BannerFlags) -> Option<BannerId> {
        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None if self.slots.len() < MAX_BANNERS => {
                self.slots.push(None);
                self.slots.len() - 1
            }
            None => return None,
        };
        let id = BannerId(index as u16);
        self.slots[index] = Some(Banner {
            id,
            position,
            text: String::new(),
            colour: Colour::default(),
            text_colour: Colour::default(),
            flags,
        });
        Some(id)
    }

    /// Whether [`BannerRegistry::create`] would succeed.
    pub fn has_free_slot(&self) -> bool {
        self.slots.len() < MAX_BANNERS || self.slots.iter().any(Option::is_none)
    }

    pub fn get(&self, id: BannerId) -> Option<&Banner> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: BannerId) -> Option<&mut Banner> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, id: BannerId) -> Option<Banner> {
        self.slots.get_mut(id.0 as usize).and_then(Option::take)
    }

    pub fn contains(&self, id: BannerId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Banner> {
        self.slots.iter().flatten()
    }
}

#[derive(Encode, Decode, Default)]
struct BannerRegistrySave {
    banners: Vec<Banner>,
}

impl Saveable for BannerRegistry {
    const SAVE_KEY: &'static str = "banners";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.is_empty() {
            return None;
        }
        let save = BannerRegistrySave {
            banners: self.iter().cloned().collect(),
        };
        Some(bitcode::encode(&save))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        let save: BannerRegistrySave = crate::decode_or_warn(Self::SAVE_KEY, bytes);
        let mut registry = BannerRegistry::default();
        for banner in save.banners {
            let index = banner.id.0 as usize;
            if index >= MAX_BANNERS {
                warn!("Saveable banners: dropping banner {} beyond slot limit", banner.id);
                continue;
            }
            if registry.slots.len() <= index {
                registry.slots.resize(index + 1, None);
            }
            registry.slots[index] = Some(banner);
        }
        registry
    }
}
