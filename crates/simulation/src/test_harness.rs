//! # TestPark: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` on a small owned map so
//! integration tests can place signs, queue actions, drive sign windows and
//! inspect the resulting resources without a window or renderer.

use bevy::app::App;
use bevy::ecs::event::Events;
use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use crate::banner::{BannerId, BannerRegistry};
use crate::coords::TileCoords;
use crate::game_actions::{
    ActionDispatcher, ActionError, ActionQueue, ActionResultLog, ActionSource, GameAction,
    ParkParams, WorldDispatcher,
};
use crate::park::{ParkFinance, ParkPermissions};
use crate::sign_window::{
    HeadlessSignUi, SignUi, SignWindowEvent, SignWindowManager, SignWindowResponse,
};
use crate::tile_elements::TileElementStore;
use crate::{SimulationPlugin, TickCounter};

/// Edge length of the harness map, in tiles.
pub const TEST_MAP_SIZE: usize = 32;

pub struct TestPark {
    app: App,
    ui: HeadlessSignUi,
}

impl Default for TestPark {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPark {
    /// A flat, fully owned `TEST_MAP_SIZE` square park with default money.
    pub fn new() -> Self {
        let ui = HeadlessSignUi::default();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Inserted before the plugin so its init_resource calls keep them.
        app.insert_resource(TileElementStore::with_flat_surface(
            TEST_MAP_SIZE,
            TEST_MAP_SIZE,
            true,
        ));
        app.insert_resource(SignUi::new(ui.clone()));
        app.add_plugins(SimulationPlugin);

        // Run Startup.
        app.update();
        Self { app, ui }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern)
    // -----------------------------------------------------------------------

    pub fn with_cash(mut self, cash: i64) -> Self {
        self.app.world_mut().resource_mut::<ParkFinance>().cash = cash;
        self
    }

    pub fn with_sandbox(mut self) -> Self {
        self.app.world_mut().resource_mut::<ParkPermissions>().sandbox_mode = true;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.app.world_mut().resource_mut::<ParkPermissions>().paused = paused;
        self
    }

    pub fn with_unowned(mut self, tile: TileCoords) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TileElementStore>()
            .set_owned(tile, false);
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Run `action` immediately through the same dispatcher sign windows use.
    pub fn submit(&mut self, action: GameAction) -> Result<i64, ActionError> {
        let world = self.app.world_mut();
        let mut state: SystemState<(ParkParams<'static>, ResMut<'static, ActionResultLog>)> =
            SystemState::new(world);
        let (mut park, mut log) = state.get_mut(world);
        WorldDispatcher::new(park.context(), &mut log, ActionSource::Player).submit(action)
    }

    /// Submit a placement and return the banner it allocated on `tile`.
    pub fn place_sign(&mut self, action: GameAction, tile: TileCoords) -> BannerId {
        if let Err(e) = self.submit(action) {
            panic!("placement on {:?} failed: {}", tile, e);
        }
        self.banner_on(tile)
            .unwrap_or_else(|| panic!("no banner on {:?} after placement", tile))
    }

    pub fn queue(&mut self, source: ActionSource, action: GameAction) {
        let tick = self.resource::<TickCounter>().0;
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(tick, source, action);
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Run exactly `n` fixed-timestep simulation ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run one full frame, which processes sign window events.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn send_sign_event(&mut self, event: SignWindowEvent) {
        self.app.world_mut().send_event(event);
    }

    /// Send each event and run a frame after it.
    pub fn drive(&mut self, events: impl IntoIterator<Item = SignWindowEvent>) {
        for event in events {
            self.send_sign_event(event);
            self.update();
        }
    }

    /// Responses produced since the last call.
    pub fn take_sign_responses(&mut self) -> Vec<SignWindowResponse> {
        self.app
            .world_mut()
            .resource_mut::<Events<SignWindowResponse>>()
            .drain()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn ui(&self) -> &HeadlessSignUi {
        &self.ui
    }

    pub fn tiles(&self) -> &TileElementStore {
        self.resource::<TileElementStore>()
    }

    pub fn banners(&self) -> &BannerRegistry {
        self.resource::<BannerRegistry>()
    }

    pub fn windows(&self) -> &SignWindowManager {
        self.resource::<SignWindowManager>()
    }

    pub fn cash(&self) -> i64 {
        self.resource::<ParkFinance>().cash
    }

    pub fn result_log(&self) -> &ActionResultLog {
        self.resource::<ActionResultLog>()
    }

    /// The banner carried by the lowest element on `tile`, if any.
    pub fn banner_on(&self, tile: TileCoords) -> Option<BannerId> {
        self.tiles()
            .first_element_at(tile)?
            .iter()
            .find_map(|element| element.banner())
    }
}
