//! Recently executed game actions and what they did to the park.
//!
//! [`ActionResultLog`] keeps the last 64 `(GameAction, ActionResult)` pairs
//! for agents and the headless front end, plus running totals that survive
//! eviction: net cash spent and rejections per [`ActionSource`].

use bevy::prelude::*;

use super::{ActionError, ActionResult, ActionSource, GameAction};

const MAX_ENTRIES: usize = 64;

/// Lifetime totals for one action source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceTally {
    pub applied: u32,
    pub rejected: u32,
    /// Sum of applied costs; refunds count negative.
    pub net_cost: i64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: Vec<(GameAction, ActionResult)>,
    // Indexed by `source_slot`.
    tallies: [SourceTally; 3],
}

fn source_slot(source: ActionSource) -> usize {
    match source {
        ActionSource::Player => 0,
        ActionSource::Agent => 1,
        ActionSource::Replay => 2,
    }
}

impl ActionResultLog {
    /// Record what `source`'s action did. The oldest entry is evicted once
    /// the log is full; the tallies are not.
    pub fn record(&mut self, source: ActionSource, action: GameAction, result: ActionResult) {
        let tally = &mut self.tallies[source_slot(source)];
        match &result {
            ActionResult::Success { cost } => {
                tally.applied += 1;
                tally.net_cost += cost;
            }
            ActionResult::Error(_) => tally.rejected += 1,
        }
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((action, result));
    }

    /// The last `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> &[(GameAction, ActionResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last_result(&self) -> Option<&ActionResult> {
        self.entries.last().map(|(_, result)| result)
    }

    /// Retained rejections, oldest first.
    pub fn rejections(&self) -> impl Iterator<Item = (&GameAction, &ActionError)> {
        self.entries
            .iter()
            .filter_map(|(action, result)| result.error().map(|error| (action, error)))
    }

    pub fn tally(&self, source: ActionSource) -> SourceTally {
        self.tallies[source_slot(source)]
    }

    /// Drops retained entries and resets every tally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tallies = Default::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(fee: i64) -> GameAction {
        GameAction::SetParkEntranceFee { fee }
    }

    #[test]
    fn record_and_last_n() {
        let mut log = ActionResultLog::default();
        log.record(ActionSource::Player, fee(5), ActionResult::Success { cost: 0 });
        log.record(
            ActionSource::Player,
            fee(500),
            ActionResult::Error(ActionError::InvalidParameters("fee".to_string())),
        );

        let last = log.last_n(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].0, fee(500));
        assert_eq!(log.last_n(10).len(), 2);
        assert!(!log.last_result().unwrap().is_success());
    }

    #[test]
    fn evicts_oldest_when_full_but_keeps_tallies() {
        let mut log = ActionResultLog::default();
        for i in 0..70 {
            log.record(ActionSource::Agent, fee(i), ActionResult::Success { cost: 10 });
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.last_n(MAX_ENTRIES)[0].0, fee(6));
        let tally = log.tally(ActionSource::Agent);
        assert_eq!(tally.applied, 70);
        assert_eq!(tally.net_cost, 700);
    }

    #[test]
    fn tallies_are_kept_per_source_and_refunds_subtract() {
        let mut log = ActionResultLog::default();
        log.record(ActionSource::Player, fee(1), ActionResult::Success { cost: 120 });
        log.record(ActionSource::Player, fee(2), ActionResult::Success { cost: -60 });
        log.record(
            ActionSource::Replay,
            fee(3),
            ActionResult::Error(ActionError::Disallowed),
        );

        assert_eq!(
            log.tally(ActionSource::Player),
            SourceTally {
                applied: 2,
                rejected: 0,
                net_cost: 60,
            }
        );
        assert_eq!(log.tally(ActionSource::Replay).rejected, 1);
        assert_eq!(log.tally(ActionSource::Agent), SourceTally::default());

        let rejections: Vec<_> = log.rejections().collect();
        assert_eq!(rejections, vec![(&fee(3), &ActionError::Disallowed)]);
    }

    #[test]
    fn clear_resets_entries_and_tallies() {
        let mut log = ActionResultLog::default();
        log.record(ActionSource::Player, fee(1), ActionResult::Success { cost: 5 });
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.tally(ActionSource::Player), SourceTally::default());
    }
}
