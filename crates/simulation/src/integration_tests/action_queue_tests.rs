//! Queued actions drained by `execute_queued_actions` during FixedUpdate.

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::coords::{CoordsXYZD, Direction, TileCoords};
use crate::game_actions::{ActionError, ActionQueue, ActionResult, ActionSource, GameAction};
use crate::park::ParkFinance;
use crate::scenery::builtin;
use crate::test_harness::TestPark;

fn billboard_at(tile: TileCoords) -> GameAction {
    GameAction::LargeSceneryPlace {
        origin: CoordsXYZD::new(tile.to_coords_xy(), 0, Direction::West),
        entry: builtin::BILLBOARD,
        primary: Colour::DARK_GREEN,
        secondary: Colour::YELLOW,
    }
}

#[test]
fn test_queued_placement_applies_on_tick() {
    let mut park = TestPark::new();
    let tile = TileCoords::new(4, 4);
    park.queue(ActionSource::Agent, billboard_at(tile));

    assert!(park.banner_on(tile).is_none(), "nothing runs before a tick");
    park.tick(1);

    assert!(park.resource::<ActionQueue>().is_empty());
    let banner = park.banner_on(tile).expect("billboard should carry a banner");
    assert_eq!(park.banner_on(TileCoords::new(4, 5)), Some(banner));
    assert_eq!(park.cash(), crate::config::STARTING_CASH - 120);

    let (action, result) = &park.result_log().last_n(1)[0];
    assert_eq!(*action, billboard_at(tile));
    assert_eq!(*result, ActionResult::Success { cost: 120 });
}

#[test]
fn test_queue_runs_in_order_within_one_tick() {
    let mut park = TestPark::new();
    let tile = TileCoords::new(6, 6);
    park.queue(ActionSource::Agent, billboard_at(tile));
    park.queue(
        ActionSource::Agent,
        GameAction::SignSetName {
            banner_id: BannerId(0),
            name: "Log Flume".to_string(),
        },
    );
    park.queue(
        ActionSource::Agent,
        GameAction::LargeSceneryRemove {
            location: CoordsXYZD::new(TileCoords::new(6, 7).to_coords_xy(), 0, Direction::West),
            sequence: 1,
        },
    );
    park.tick(1);

    let results: Vec<bool> = park
        .result_log()
        .last_n(3)
        .iter()
        .map(|(_, result)| result.is_success())
        .collect();
    assert_eq!(results, vec![true, true, true]);
    assert!(park.banners().is_empty());
    assert!(park.banner_on(tile).is_none());
    assert_eq!(park.cash(), crate::config::STARTING_CASH - 120 + 60);
}

#[test]
fn test_rejected_action_does_not_block_the_rest() {
    let mut park = TestPark::new().with_unowned(TileCoords::new(2, 3));
    park.queue(ActionSource::Agent, billboard_at(TileCoords::new(2, 2)));
    park.queue(ActionSource::Agent, billboard_at(TileCoords::new(9, 9)));
    park.tick(1);

    let log = park.result_log().last_n(2);
    assert_eq!(log[0].1.error(), Some(&ActionError::NotOwned));
    assert!(log[1].1.is_success());
    assert!(park.banner_on(TileCoords::new(2, 2)).is_none());
    assert!(park.banner_on(TileCoords::new(9, 9)).is_some());
}

#[test]
fn test_paused_park_rejects_construction_but_allows_fee() {
    let mut park = TestPark::new().with_paused(true);
    park.queue(ActionSource::Agent, billboard_at(TileCoords::new(3, 3)));
    park.queue(ActionSource::Agent, GameAction::SetParkEntranceFee { fee: 25 });
    park.tick(1);

    let log = park.result_log().last_n(2);
    assert_eq!(log[0].1.error(), Some(&ActionError::Disallowed));
    assert!(log[1].1.is_success());
    assert_eq!(park.resource::<ParkFinance>().entrance_fee, 25);
}

#[test]
fn test_insufficient_funds_leaves_world_untouched() {
    let mut park = TestPark::new().with_cash(50);
    park.queue(ActionSource::Agent, billboard_at(TileCoords::new(3, 3)));
    park.tick(1);

    assert_eq!(
        park.result_log().last_n(1)[0].1.error(),
        Some(&ActionError::InsufficientFunds)
    );
    assert_eq!(park.cash(), 50);
    assert!(park.banners().is_empty());
    assert_eq!(park.tiles().element_count(TileCoords::new(3, 3)), 1);
}

#[test]
fn test_queue_stamps_current_tick() {
    let mut park = TestPark::new();
    park.tick(3);
    let tick = park.resource::<crate::TickCounter>().0;
    park.queue(ActionSource::Replay, GameAction::SetParkEntranceFee { fee: 10 });

    let mut pending = park.world_mut().resource_mut::<ActionQueue>().drain();
    let queued = pending.pop().unwrap();
    assert_eq!(queued.tick, tick);
    assert_eq!(queued.source, ActionSource::Replay);
}

#[test]
fn test_result_log_keeps_last_64() {
    let mut park = TestPark::new();
    for fee in 0..70 {
        park.queue(ActionSource::Agent, GameAction::SetParkEntranceFee { fee });
    }
    park.tick(1);

    let log = park.result_log();
    assert_eq!(log.len(), 64);
    assert_eq!(
        log.last_n(64)[0].0,
        GameAction::SetParkEntranceFee { fee: 6 }
    );
    assert_eq!(park.resource::<ParkFinance>().entrance_fee, 69);
}
