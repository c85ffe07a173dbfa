//! Ordering phases for park systems.
//!
//! # FixedUpdate (`SimulationSet`)
//!
//! ```text
//! PreSim  →  PostSim
//! ```
//!
//! * **PreSim** runs the tick counter and drains the [`ActionQueue`], so
//!   every queued action lands before anything reads the tick's state.
//! * **PostSim** only reads the world: it closes sign windows whose sign
//!   was removed during the tick.
//!
//! # Update (`SimulationUpdateSet`)
//!
//! * **Input** handles sign window events one at a time, each dispatch
//!   included, in arrival order.
//!
//! [`ActionQueue`]: crate::game_actions::ActionQueue

use bevy::prelude::*;

/// Configured as a chain: `PreSim` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    PostSim,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    Input,
}
