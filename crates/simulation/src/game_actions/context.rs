//! Borrowed views of park state used to validate and apply actions.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::banner::BannerRegistry;
use crate::park::{ParkFinance, ParkPermissions};
use crate::scenery::SceneryRegistry;
use crate::tile_elements::TileElementStore;

use super::{ActionError, GameAction};

/// Mutable borrow of every resource an action may touch. Built fresh per
/// dispatch from the ECS resources or from test fixtures.
pub struct ParkContext<'w> {
    pub tiles: &'w mut TileElementStore,
    pub banners: &'w mut BannerRegistry,
    pub scenery: &'w SceneryRegistry,
    pub finance: &'w mut ParkFinance,
    pub permissions: &'w ParkPermissions,
}

/// Read access to the world a sign window inspects.
pub trait ParkView {
    fn tiles(&self) -> &TileElementStore;
    fn banners(&self) -> &BannerRegistry;
    fn scenery(&self) -> &SceneryRegistry;
}

/// Something that accepts game actions and reports whether they ran.
///
/// `Ok` carries the cost charged to the park.
pub trait ActionDispatcher {
    fn submit(&mut self, action: GameAction) -> Result<i64, ActionError>;
}

/// Shared borrow of the park, for readers that never dispatch.
#[derive(Clone, Copy)]
pub struct ParkRef<'w> {
    pub tiles: &'w TileElementStore,
    pub banners: &'w BannerRegistry,
    pub scenery: &'w SceneryRegistry,
}

impl ParkView for ParkRef<'_> {
    fn tiles(&self) -> &TileElementStore {
        self.tiles
    }

    fn banners(&self) -> &BannerRegistry {
        self.banners
    }

    fn scenery(&self) -> &SceneryRegistry {
        self.scenery
    }
}

impl ParkView for ParkContext<'_> {
    fn tiles(&self) -> &TileElementStore {
        &*self.tiles
    }

    fn banners(&self) -> &BannerRegistry {
        &*self.banners
    }

    fn scenery(&self) -> &SceneryRegistry {
        self.scenery
    }
}

/// The park resources as system parameters, for systems that dispatch.
#[derive(SystemParam)]
pub struct ParkParams<'w> {
    tiles: ResMut<'w, TileElementStore>,
    banners: ResMut<'w, BannerRegistry>,
    scenery: Res<'w, SceneryRegistry>,
    finance: ResMut<'w, ParkFinance>,
    permissions: Res<'w, ParkPermissions>,
}

impl ParkParams<'_> {
    pub fn context(&mut self) -> ParkContext<'_> {
        ParkContext {
            tiles: &mut self.tiles,
            banners: &mut self.banners,
            scenery: &self.scenery,
            finance: &mut self.finance,
            permissions: &self.permissions,
        }
    }
}
