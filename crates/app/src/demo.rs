//! Scripted walk through a sign window on a small demo park: place two
//! signs, then rename, restyle, rotate and demolish through window events.

use bevy::ecs::event::Events;
use bevy::prelude::*;

use simulation::banner::{BannerId, BannerRegistry};
use simulation::colour::Colour;
use simulation::coords::{CoordsXYZD, Direction, TileCoords};
use simulation::element_locator::SignKind;
use simulation::game_actions::{ActionQueue, ActionResultLog, ActionSource, GameAction};
use simulation::park::ParkFinance;
use simulation::scenery::builtin;
use simulation::sign_window::{SignWidget, SignWindowEvent, SignWindowResponse};
use simulation::TickCounter;

const BILLBOARD_TILE: TileCoords = TileCoords::new(10, 10);
const WALL_SIGN_TILE: TileCoords = TileCoords::new(14, 10);

pub fn run(app: &mut App) {
    seed_park(app);

    let (Some(billboard), Some(wall_sign)) = (
        banner_at(app, BILLBOARD_TILE),
        banner_at(app, WALL_SIGN_TILE),
    ) else {
        error!("demo signs were not placed, nothing to show");
        return;
    };

    // The text prompt and colour menu are answered by the next events, the
    // way a front end would report them.
    drive(
        app,
        vec![
            SignWindowEvent::Open {
                banner_id: billboard,
                kind: SignKind::LargeScenery,
            },
            SignWindowEvent::MouseUp {
                banner_id: billboard,
                widget: SignWidget::SignText,
            },
            SignWindowEvent::TextInput {
                banner_id: billboard,
                text: Some("Welcome to the Park".to_string()),
            },
            SignWindowEvent::MouseDown {
                banner_id: billboard,
                widget: SignWidget::MainColour,
            },
            SignWindowEvent::Dropdown {
                banner_id: billboard,
                widget: SignWidget::MainColour,
                index: Some(Colour::BRIGHT_RED.index() as usize),
            },
            SignWindowEvent::Open {
                banner_id: wall_sign,
                kind: SignKind::Wall,
            },
            SignWindowEvent::ViewportRotated,
            SignWindowEvent::MouseUp {
                banner_id: wall_sign,
                widget: SignWidget::Demolish,
            },
        ],
    );

    report(app);
}

fn seed_park(app: &mut App) {
    let actions = [
        GameAction::LargeSceneryPlace {
            origin: CoordsXYZD::new(BILLBOARD_TILE.to_coords_xy(), 0, Direction::West),
            entry: builtin::BILLBOARD,
            primary: Colour::DARK_GREEN,
            secondary: Colour::YELLOW,
        },
        GameAction::WallPlace {
            location: CoordsXYZD::new(WALL_SIGN_TILE.to_coords_xy(), 0, Direction::South),
            entry: builtin::SCROLLING_WALL_SIGN,
            primary: Colour::WHITE,
            secondary: Colour::LIGHT_BLUE,
        },
        GameAction::SetParkEntranceFee { fee: 20 },
    ];

    let tick = app.world().resource::<TickCounter>().0;
    let mut queue = app.world_mut().resource_mut::<ActionQueue>();
    for action in actions {
        queue.push(tick, ActionSource::Replay, action);
    }
    app.world_mut().run_schedule(FixedUpdate);

    for (action, result) in app.world().resource::<ActionResultLog>().last_n(3) {
        info!("seed {}: {:?}", action.name(), result);
    }
}

fn banner_at(app: &App, tile: TileCoords) -> Option<BannerId> {
    app.world()
        .resource::<BannerRegistry>()
        .iter()
        .find(|banner| banner.position == tile)
        .map(|banner| banner.id)
}

/// Send events one update at a time and log every window response.
fn drive(app: &mut App, events: Vec<SignWindowEvent>) {
    for event in events {
        debug!("sign window event {:?}", event);
        app.world_mut().send_event(event);
        app.update();
        let responses: Vec<SignWindowResponse> = app
            .world_mut()
            .resource_mut::<Events<SignWindowResponse>>()
            .drain()
            .collect();
        for response in responses {
            info!("sign {} -> {:?}", response.banner_id, response.response);
        }
    }
}

fn report(app: &App) {
    for banner in app.world().resource::<BannerRegistry>().iter() {
        info!(
            "banner {} at ({}, {}): '{}' colour {} text colour {}",
            banner.id,
            banner.position.x,
            banner.position.y,
            banner.text(),
            banner.colour.index(),
            banner.text_colour.index()
        );
    }
    let finance = app.world().resource::<ParkFinance>();
    info!("cash {} entrance fee {}", finance.cash, finance.entrance_fee);

    let log = app.world().resource::<ActionResultLog>();
    for source in [ActionSource::Replay, ActionSource::Player] {
        let tally = log.tally(source);
        info!(
            "{:?}: {} applied, {} rejected, net cost {}",
            source, tally.applied, tally.rejected, tally.net_cost
        );
    }
    for (action, error) in log.rejections() {
        warn!("{} was rejected: {}", action.name(), error);
    }
}
