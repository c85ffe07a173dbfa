//! Park-wide money and permission state consulted by the action dispatcher.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::STARTING_CASH;
use crate::Saveable;

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct ParkFinance {
    pub cash: i64,
    /// Scenario flag: money is not tracked and nothing costs anything.
    pub no_money: bool,
    pub entrance_fee: i64,
    pub entrance_fee_unlocked: bool,
}

impl Default for ParkFinance {
    fn default() -> Self {
        Self {
            cash: STARTING_CASH,
            no_money: false,
            entrance_fee: 0,
            entrance_fee_unlocked: true,
        }
    }
}

impl ParkFinance {
    pub fn can_afford(&self, cost: i64) -> bool {
        self.no_money || cost <= 0 || self.cash >= cost
    }

    /// Charge `cost` (negative values credit the park). Ignored without money.
    pub fn apply_cost(&mut self, cost: i64) {
        if !self.no_money {
            self.cash -= cost;
        }
    }
}

impl Saveable for ParkFinance {
    const SAVE_KEY: &'static str = "park_finance";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Game-wide switches that gate which actions may run.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkPermissions {
    /// Land ownership is not enforced.
    pub sandbox_mode: bool,
    /// Construction and demolition are allowed while paused.
    pub build_while_paused: bool,
    pub paused: bool,
}
