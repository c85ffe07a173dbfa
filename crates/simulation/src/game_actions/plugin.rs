//! Plugin that wires up the game-actions subsystem: queue, executor, and log.

use bevy::prelude::*;

use super::executor::execute_queued_actions;
use super::result_log::ActionResultLog;
use super::ActionQueue;
use crate::SaveableAppExt;
use crate::SimulationSet;

pub struct GameActionsPlugin;

impl Plugin for GameActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionQueue>()
            .init_resource::<ActionResultLog>()
            .register_saveable::<ActionQueue>();

        app.add_systems(
            FixedUpdate,
            execute_queued_actions.in_set(SimulationSet::PreSim),
        );
    }
}
