//! Action executor: validates each [`GameAction`] against the park, then
//! applies it.
//!
//! Every action runs in two phases. The query phase reads the world and
//! builds a plan or an [`ActionError`]; nothing is mutated. The execute
//! phase applies a plan that has already passed validation, so a rejected
//! action always leaves the world untouched.

use bevy::prelude::*;

use crate::banner::{BannerFlags, BannerId};
use crate::colour::Colour;
use crate::config::{COORDS_Z_STEP, MAX_ENTRANCE_FEE, SIGN_TEXT_MAX_LENGTH};
use crate::coords::{CoordsXYZD, TileCoords};
use crate::element_locator::{locate, SignKind};
use crate::tile_elements::{LargeSceneryElement, TileElement, TileElementKind, WallElement};

use super::context::{ParkContext, ParkParams};
use super::result_log::ActionResultLog;
use super::{ActionError, ActionQueue, ActionResult, ActionSource, GameAction};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut park: ParkParams,
) {
    if queue.is_empty() {
        return;
    }
    let mut ctx = park.context();
    for queued in queue.drain() {
        let result = execute_action(&queued.action, &mut ctx);
        log_outcome(queued.source, &queued.action, &result);
        log.record(queued.source, queued.action, result);
    }
}

pub(crate) fn log_outcome(source: ActionSource, action: &GameAction, result: &ActionResult) {
    match result {
        ActionResult::Success { cost } => {
            debug!("{:?} action {} applied, cost {}", source, action.name(), cost);
        }
        ActionResult::Error(error) => {
            warn!("{:?} action {} rejected: {}", source, action.name(), error);
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate `action` without applying it. Returns the cost it would charge.
pub fn query_action(action: &GameAction, park: &ParkContext<'_>) -> ActionResult {
    match plan_action(action, park) {
        Ok(plan) => ActionResult::Success { cost: plan.cost },
        Err(error) => ActionResult::Error(error),
    }
}

/// Validate and apply `action`, charging its cost to the park.
pub fn execute_action(action: &GameAction, park: &mut ParkContext<'_>) -> ActionResult {
    let plan = match plan_action(action, park) {
        Ok(plan) => plan,
        Err(error) => return ActionResult::Error(error),
    };
    let cost = plan.cost;
    if let Err(error) = apply_plan(plan.effect, park) {
        return ActionResult::Error(error);
    }
    park.finance.apply_cost(cost);
    ActionResult::Success { cost }
}

// ---------------------------------------------------------------------------
// Query phase
// ---------------------------------------------------------------------------

struct Plan {
    cost: i64,
    effect: Effect,
}

enum Effect {
    RenameBanner {
        banner_id: BannerId,
        text: String,
    },
    RestyleSign {
        banner_id: BannerId,
        main_colour: Colour,
        text_colour: Colour,
        targets: Vec<(TileCoords, usize)>,
    },
    PlaceElements {
        /// Tile the new banner (if any) is recorded at.
        banner_tile: TileCoords,
        banner_flags: Option<BannerFlags>,
        elements: Vec<(TileCoords, TileElement)>,
    },
    RemoveElements {
        targets: Vec<(TileCoords, usize)>,
        banner: Option<BannerId>,
    },
    SetEntranceFee {
        fee: i64,
    },
}

fn plan_action(action: &GameAction, park: &ParkContext<'_>) -> Result<Plan, ActionError> {
    if park.permissions.paused
        && !park.permissions.build_while_paused
        && !action.allowed_while_paused()
    {
        return Err(ActionError::Disallowed);
    }

    let plan = match action {
        GameAction::SignSetName { banner_id, name } => plan_set_name(*banner_id, name, park)?,
        GameAction::SignSetStyle {
            banner_id,
            main_colour,
            text_colour,
            is_large,
        } => plan_set_style(*banner_id, *main_colour, *text_colour, *is_large, park)?,
        GameAction::LargeSceneryPlace {
            origin,
            entry,
            primary,
            secondary,
        } => plan_place_large_scenery(*origin, *entry, *primary, *secondary, park)?,
        GameAction::LargeSceneryRemove { location, sequence } => {
            plan_remove_large_scenery(*location, *sequence, park)?
        }
        GameAction::WallPlace {
            location,
            entry,
            primary,
            secondary,
        } => plan_place_wall(*location, *entry, *primary, *secondary, park)?,
        GameAction::WallRemove { location } => plan_remove_wall(*location, park)?,
        GameAction::SetParkEntranceFee { fee } => plan_set_entrance_fee(*fee, park)?,
    };

    if !park.finance.can_afford(plan.cost) {
        return Err(ActionError::InsufficientFunds);
    }
    Ok(plan)
}

fn invalid(msg: impl Into<String>) -> ActionError {
    ActionError::InvalidParameters(msg.into())
}

fn check_tile(park: &ParkContext<'_>, tile: TileCoords) -> Result<(), ActionError> {
    if !park.tiles.in_bounds(tile) {
        return Err(ActionError::OutOfBounds);
    }
    if !park.permissions.sandbox_mode && !park.tiles.is_owned(tile) {
        return Err(ActionError::NotOwned);
    }
    Ok(())
}

fn check_colours(colours: &[Colour]) -> Result<(), ActionError> {
    match colours.iter().find(|colour| !colour.is_valid()) {
        Some(colour) => Err(invalid(format!("colour {} out of range", colour.index()))),
        None => Ok(()),
    }
}

fn base_height_of(location: CoordsXYZD) -> Result<u8, ActionError> {
    location
        .base_height()
        .ok_or_else(|| invalid(format!("height {} is not a valid element height", location.z)))
}

/// Convert a world-unit height span to element units, rounding up.
fn height_units(z: i32) -> Option<u8> {
    u8::try_from((z.max(0) + COORDS_Z_STEP - 1) / COORDS_Z_STEP).ok()
}

fn overlaps(a: &TileElement, b: &TileElement) -> bool {
    let top = |element: &TileElement| {
        element
            .clearance_height
            .max(element.base_height.saturating_add(1))
    };
    a.base_height < top(b) && b.base_height < top(a)
}

fn plan_set_name(banner_id: BannerId, name: &str, park: &ParkContext<'_>) -> Result<Plan, ActionError> {
    if !park.banners.contains(banner_id) {
        return Err(invalid(format!("banner {banner_id} does not exist")));
    }
    let text = name.trim();
    if text.is_empty() {
        return Err(invalid("sign text is empty"));
    }
    if text.chars().count() > SIGN_TEXT_MAX_LENGTH {
        return Err(invalid(format!(
            "sign text longer than {SIGN_TEXT_MAX_LENGTH} characters"
        )));
    }
    Ok(Plan {
        cost: 0,
        effect: Effect::RenameBanner {
            banner_id,
            text: text.to_string(),
        },
    })
}

fn plan_set_style(
    banner_id: BannerId,
    main_colour: Colour,
    text_colour: Colour,
    is_large: bool,
    park: &ParkContext<'_>,
) -> Result<Plan, ActionError> {
    check_colours(&[main_colour, text_colour])?;
    let banner = park
        .banners
        .get(banner_id)
        .ok_or_else(|| invalid(format!("banner {banner_id} does not exist")))?;
    let kind = if is_large {
        SignKind::LargeScenery
    } else {
        SignKind::Wall
    };
    let handle = locate(&*park.tiles, park.scenery, banner.position, banner_id, kind)
        .map_err(|_| ActionError::ElementNotFound)?;
    let targets = match kind {
        SignKind::LargeScenery => large_scenery_pieces(park, handle.location(), handle.sequence)?.1,
        SignKind::Wall => vec![(handle.position, handle.stack_index)],
    };
    Ok(Plan {
        cost: 0,
        effect: Effect::RestyleSign {
            banner_id,
            main_colour,
            text_colour,
            targets,
        },
    })
}

/// Every piece of the large scenery object whose `sequence` piece sits at
/// `location`. Fails when any piece is missing from where the object's
/// footprint puts it.
fn large_scenery_pieces(
    park: &ParkContext<'_>,
    location: CoordsXYZD,
    sequence: u8,
) -> Result<(u16, Vec<(TileCoords, usize)>), ActionError> {
    let base = base_height_of(location)?;
    let tile = location.tile();
    if !park.tiles.in_bounds(tile) {
        return Err(ActionError::OutOfBounds);
    }
    let direction = location.direction;
    let entry = park
        .tiles
        .first_element_at(tile)
        .and_then(|stack| {
            stack.iter().find_map(|element| {
                let large = element.as_large_scenery()?;
                (element.base_height == base
                    && element.direction == direction
                    && large.sequence == sequence)
                    .then_some(large.entry)
            })
        })
        .ok_or(ActionError::ElementNotFound)?;

    let def = park
        .scenery
        .large_scenery(entry)
        .ok_or_else(|| invalid(format!("unknown large scenery entry {entry}")))?;
    let piece = def
        .tiles
        .get(sequence as usize)
        .ok_or_else(|| invalid(format!("sequence {sequence} outside footprint")))?;

    let origin_xy = location.xy().difference(piece.offset.rotate(direction));
    let origin_z = location.z - piece.z_offset;

    let mut pieces = Vec::with_capacity(def.tiles.len());
    for (index, tile_def) in def.tiles.iter().enumerate() {
        let xy = origin_xy.offset(tile_def.offset.rotate(direction));
        let piece_base = CoordsXYZD::new(xy, origin_z + tile_def.z_offset, direction)
            .base_height()
            .ok_or(ActionError::ElementNotFound)?;
        let piece_tile = xy.to_tile_coords();
        let stack_index = park
            .tiles
            .position(piece_tile, |element| {
                element.base_height == piece_base
                    && element.direction == direction
                    && element
                        .as_large_scenery()
                        .is_some_and(|large| large.entry == entry && large.sequence as usize == index)
            })
            .ok_or(ActionError::ElementNotFound)?;
        pieces.push((piece_tile, stack_index));
    }
    Ok((entry, pieces))
}

fn plan_place_large_scenery(
    origin: CoordsXYZD,
    entry: u16,
    primary: Colour,
    secondary: Colour,
    park: &ParkContext<'_>,
) -> Result<Plan, ActionError> {
    check_colours(&[primary, secondary])?;
    let def = park
        .scenery
        .large_scenery(entry)
        .ok_or_else(|| invalid(format!("unknown large scenery entry {entry}")))?;
    if def.tiles.is_empty() {
        return Err(invalid(format!("{} has no tiles", def.identifier)));
    }
    base_height_of(origin)?;
    let direction = origin.direction;

    let mut elements = Vec::with_capacity(def.tiles.len());
    for (index, tile_def) in def.tiles.iter().enumerate() {
        let xy = origin.xy().offset(tile_def.offset.rotate(direction));
        let tile = xy.to_tile_coords();
        check_tile(park, tile)?;
        let base = base_height_of(CoordsXYZD::new(xy, origin.z + tile_def.z_offset, direction))?;
        let clearance = height_units(tile_def.clearance)
            .and_then(|span| base.checked_add(span))
            .ok_or_else(|| invalid("object too tall"))?;
        let sequence = u8::try_from(index).map_err(|_| invalid("footprint too large"))?;
        let element = TileElement::new(
            base,
            clearance,
            direction,
            TileElementKind::LargeScenery(LargeSceneryElement {
                entry,
                sequence,
                primary,
                secondary,
                banner: None,
            }),
        );
        let blocked = park.tiles.first_element_at(tile).is_some_and(|stack| {
            stack.iter().any(|existing| {
                matches!(
                    existing.kind,
                    TileElementKind::Path { .. }
                        | TileElementKind::Track { .. }
                        | TileElementKind::SmallScenery { .. }
                        | TileElementKind::Entrance { .. }
                        | TileElementKind::LargeScenery(_)
                ) && overlaps(existing, &element)
            })
        });
        if blocked {
            return Err(ActionError::Occupied);
        }
        elements.push((tile, element));
    }

    let banner_flags = def.scrolling_mode.is_scrolling().then_some(BannerFlags {
        is_large_scenery: true,
        is_wall: false,
    });
    if banner_flags.is_some() && !park.banners.has_free_slot() {
        return Err(ActionError::BannerLimitReached);
    }
    Ok(Plan {
        cost: def.price,
        effect: Effect::PlaceElements {
            banner_tile: origin.tile(),
            banner_flags,
            elements,
        },
    })
}

fn plan_remove_large_scenery(
    location: CoordsXYZD,
    sequence: u8,
    park: &ParkContext<'_>,
) -> Result<Plan, ActionError> {
    let (entry, targets) = large_scenery_pieces(park, location, sequence)?;
    for (tile, _) in &targets {
        check_tile(park, *tile)?;
    }
    let banner = targets
        .iter()
        .find_map(|(tile, index)| park.tiles.get(*tile, *index).and_then(TileElement::banner));
    let cost = park
        .scenery
        .large_scenery(entry)
        .map_or(0, |def| def.removal_price);
    Ok(Plan {
        cost,
        effect: Effect::RemoveElements { targets, banner },
    })
}

fn plan_place_wall(
    location: CoordsXYZD,
    entry: u16,
    primary: Colour,
    secondary: Colour,
    park: &ParkContext<'_>,
) -> Result<Plan, ActionError> {
    check_colours(&[primary, secondary])?;
    let def = park
        .scenery
        .wall(entry)
        .ok_or_else(|| invalid(format!("unknown wall entry {entry}")))?;
    let tile = location.tile();
    check_tile(park, tile)?;
    let base = base_height_of(location)?;
    let clearance = height_units(def.height)
        .and_then(|span| base.checked_add(span))
        .ok_or_else(|| invalid("wall too tall"))?;
    let element = TileElement::new(
        base,
        clearance,
        location.direction,
        TileElementKind::Wall(WallElement {
            entry,
            primary,
            secondary,
            tertiary: Colour::BLACK,
            banner: None,
        }),
    );
    let blocked = park.tiles.first_element_at(tile).is_some_and(|stack| {
        stack.iter().any(|existing| {
            existing.as_wall().is_some()
                && existing.direction == location.direction
                && overlaps(existing, &element)
        })
    });
    if blocked {
        return Err(ActionError::Occupied);
    }

    let banner_flags = def.scrolling_mode.is_scrolling().then_some(BannerFlags {
        is_large_scenery: false,
        is_wall: true,
    });
    if banner_flags.is_some() && !park.banners.has_free_slot() {
        return Err(ActionError::BannerLimitReached);
    }
    Ok(Plan {
        cost: def.price,
        effect: Effect::PlaceElements {
            banner_tile: tile,
            banner_flags,
            elements: vec![(tile, element)],
        },
    })
}

fn plan_remove_wall(location: CoordsXYZD, park: &ParkContext<'_>) -> Result<Plan, ActionError> {
    let tile = location.tile();
    if !park.tiles.in_bounds(tile) {
        return Err(ActionError::OutOfBounds);
    }
    let base = base_height_of(location)?;
    let stack_index = park
        .tiles
        .position(tile, |element| {
            element.as_wall().is_some()
                && element.base_height == base
                && element.direction == location.direction
        })
        .ok_or(ActionError::ElementNotFound)?;
    check_tile(park, tile)?;
    let banner = park.tiles.get(tile, stack_index).and_then(TileElement::banner);
    Ok(Plan {
        cost: 0,
        effect: Effect::RemoveElements {
            targets: vec![(tile, stack_index)],
            banner,
        },
    })
}

fn plan_set_entrance_fee(fee: i64, park: &ParkContext<'_>) -> Result<Plan, ActionError> {
    if park.finance.no_money || !park.finance.entrance_fee_unlocked {
        return Err(ActionError::Disallowed);
    }
    if !(0..=MAX_ENTRANCE_FEE).contains(&fee) {
        return Err(invalid(format!("entrance fee {fee} outside 0..={MAX_ENTRANCE_FEE}")));
    }
    Ok(Plan {
        cost: 0,
        effect: Effect::SetEntranceFee { fee },
    })
}

// ---------------------------------------------------------------------------
// Execute phase
// ---------------------------------------------------------------------------

fn apply_plan(effect: Effect, park: &mut ParkContext<'_>) -> Result<(), ActionError> {
    match effect {
        Effect::RenameBanner { banner_id, text } => {
            let banner = park
                .banners
                .get_mut(banner_id)
                .ok_or(ActionError::ElementNotFound)?;
            banner.text = text;
        }
        Effect::RestyleSign {
            banner_id,
            main_colour,
            text_colour,
            targets,
        } => {
            for (tile, index) in targets {
                let Some(element) = park.tiles.get_mut(tile, index) else {
                    continue;
                };
                match &mut element.kind {
                    TileElementKind::LargeScenery(large) => {
                        large.primary = main_colour;
                        large.secondary = text_colour;
                    }
                    TileElementKind::Wall(wall) => {
                        wall.primary = main_colour;
                        wall.secondary = text_colour;
                    }
                    _ => {}
                }
            }
            if let Some(banner) = park.banners.get_mut(banner_id) {
                banner.colour = main_colour;
                banner.text_colour = text_colour;
            }
        }
        Effect::PlaceElements {
            banner_tile,
            banner_flags,
            elements,
        } => {
            let banner = match banner_flags {
                Some(flags) => Some(
                    park.banners
                        .create(banner_tile, flags)
                        .ok_or(ActionError::BannerLimitReached)?,
                ),
                None => None,
            };
            if let (Some(id), Some((_, first))) = (banner, elements.first()) {
                if let Some(record) = park.banners.get_mut(id) {
                    let (colour, text_colour) = match first.kind {
                        TileElementKind::LargeScenery(large) => (large.primary, large.secondary),
                        TileElementKind::Wall(wall) => (wall.primary, wall.secondary),
                        _ => (Colour::default(), Colour::default()),
                    };
                    record.colour = colour;
                    record.text_colour = text_colour;
                }
            }
            for (tile, mut element) in elements {
                match &mut element.kind {
                    TileElementKind::LargeScenery(large) => large.banner = banner,
                    TileElementKind::Wall(wall) => wall.banner = banner,
                    _ => {}
                }
                park.tiles.insert(tile, element);
            }
        }
        Effect::RemoveElements {
            mut targets,
            banner,
        } => {
            // Highest index first so earlier removals on a shared tile do not
            // shift later ones.
            targets.sort_by(|a, b| b.1.cmp(&a.1));
            for (tile, index) in targets {
                park.tiles.remove(tile, index);
            }
            if let Some(id) = banner {
                park.banners.remove(id);
            }
        }
        Effect::SetEntranceFee { fee } => {
            park.finance.entrance_fee = fee;
        }
    }
    Ok(())
}
