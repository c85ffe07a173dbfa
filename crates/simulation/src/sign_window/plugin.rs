use bevy::prelude::*;

use super::manager::SignWindowManager;
use super::services::SignUi;
use super::systems::{
    close_stale_sign_windows, process_sign_window_events, SignWindowEvent, SignWindowResponse,
};
use crate::{SimulationSet, SimulationUpdateSet};

pub struct SignWindowPlugin;

impl Plugin for SignWindowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SignWindowManager>()
            .init_resource::<SignUi>()
            .add_event::<SignWindowEvent>()
            .add_event::<SignWindowResponse>()
            .add_systems(
                Update,
                process_sign_window_events.in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                FixedUpdate,
                close_stale_sign_windows.in_set(SimulationSet::PostSim),
            );
    }
}
