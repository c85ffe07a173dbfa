use bevy::prelude::*;

pub mod banner;
pub mod colour;
pub mod config;
pub mod content;
pub mod coords;
pub mod element_locator;
pub mod game_actions;
pub mod park;
pub mod saveable;
pub mod scenery;
pub mod sign_capabilities;
pub mod sign_window;
pub mod simulation_sets;
pub mod tile_elements;

#[cfg(test)]
pub mod test_harness;

pub use saveable::{decode_or_warn, Saveable, SaveableAppExt, SaveableRegistry};
pub use simulation_sets::{SimulationSet, SimulationUpdateSet};

use banner::BannerRegistry;
use config::GeneralConfig;
use park::{ParkFinance, ParkPermissions};
use scenery::SceneryRegistry;
use tile_elements::TileElementStore;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Incremented once per FixedUpdate; stamps queued actions.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<TileElementStore>()
            .init_resource::<BannerRegistry>()
            .init_resource::<SceneryRegistry>()
            .init_resource::<ParkFinance>()
            .init_resource::<ParkPermissions>()
            .init_resource::<GeneralConfig>()
            .register_saveable::<BannerRegistry>()
            .register_saveable::<ParkFinance>()
            .register_saveable::<GeneralConfig>()
            .configure_sets(
                FixedUpdate,
                (SimulationSet::PreSim, SimulationSet::PostSim).chain(),
            )
            .add_systems(Startup, load_configured_content)
            .add_systems(
                FixedUpdate,
                advance_tick
                    .in_set(SimulationSet::PreSim)
                    .before(game_actions::execute_queued_actions),
            );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            sign_window::SignWindowPlugin,
        ));
    }
}

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Replace the built-in scenery with the configured content directory, if
/// any. A directory that cannot be read leaves the built-ins in place.
fn load_configured_content(config: Res<GeneralConfig>, mut scenery: ResMut<SceneryRegistry>) {
    let Some(dir) = config.content_dir.as_deref() else {
        return;
    };
    match SceneryRegistry::load_dir(std::path::Path::new(dir)) {
        Ok((registry, _report)) => *scenery = registry,
        Err(e) => warn!("content directory unavailable, using built-in scenery: {}", e),
    }
}
