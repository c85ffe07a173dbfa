//! Immediate dispatch for callers that need an action's outcome right away,
//! such as a sign window reacting to a button press.

use crate::banner::BannerRegistry;
use crate::scenery::SceneryRegistry;
use crate::tile_elements::TileElementStore;

use super::context::{ActionDispatcher, ParkContext, ParkView};
use super::executor::{execute_action, log_outcome};
use super::result_log::ActionResultLog;
use super::{ActionError, ActionSource, GameAction};

/// Runs actions synchronously against borrowed park state and records each
/// outcome in the [`ActionResultLog`].
pub struct WorldDispatcher<'w> {
    park: ParkContext<'w>,
    log: &'w mut ActionResultLog,
    source: ActionSource,
}

impl<'w> WorldDispatcher<'w> {
    pub fn new(park: ParkContext<'w>, log: &'w mut ActionResultLog, source: ActionSource) -> Self {
        Self { park, log, source }
    }
}

impl ActionDispatcher for WorldDispatcher<'_> {
    fn submit(&mut self, action: GameAction) -> Result<i64, ActionError> {
        let result = execute_action(&action, &mut self.park);
        log_outcome(self.source, &action, &result);
        self.log.record(self.source, action, result.clone());
        result.into_result()
    }
}

impl ParkView for WorldDispatcher<'_> {
    fn tiles(&self) -> &TileElementStore {
        self.park.tiles()
    }

    fn banners(&self) -> &BannerRegistry {
        self.park.banners()
    }

    fn scenery(&self) -> &SceneryRegistry {
        self.park.scenery()
    }
}
