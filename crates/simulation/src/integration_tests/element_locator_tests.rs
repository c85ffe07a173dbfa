//! Seeded random stacks checking that the locator's answer depends only on
//! the stack contents, never on where the tile is.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::coords::{Direction, TileCoords};
use crate::element_locator::{locate, NotFound, SignKind};
use crate::scenery::{builtin, SceneryRegistry};
use crate::tile_elements::{
    LargeSceneryElement, TileElement, TileElementKind, TileElementStore, WallElement,
};

const TARGET: BannerId = BannerId(7);
const OTHER: BannerId = BannerId(8);
const MAP: usize = 64;

fn random_colour(rng: &mut ChaCha8Rng) -> Colour {
    Colour::new(rng.gen_range(0..32)).unwrap_or_default()
}

fn random_filler(rng: &mut ChaCha8Rng) -> TileElement {
    let base = rng.gen_range(0..40u8);
    let direction = Direction::from_index(rng.gen_range(0..4));
    let kind = match rng.gen_range(0..6) {
        0 => TileElementKind::Path { entry: 1 },
        1 => TileElementKind::SmallScenery {
            entry: 3,
            primary: random_colour(rng),
            secondary: random_colour(rng),
        },
        2 => TileElementKind::Track {
            ride_index: rng.gen_range(0..4),
            sequence: rng.gen_range(0..8),
        },
        // A fence carrying the target id still cannot display it.
        3 => TileElementKind::Wall(WallElement {
            entry: builtin::WOODEN_FENCE,
            primary: random_colour(rng),
            secondary: random_colour(rng),
            tertiary: Colour::BLACK,
            banner: Some(TARGET),
        }),
        4 => TileElementKind::Wall(WallElement {
            entry: builtin::SCROLLING_WALL_SIGN,
            primary: random_colour(rng),
            secondary: random_colour(rng),
            tertiary: Colour::BLACK,
            banner: Some(OTHER),
        }),
        _ => TileElementKind::LargeScenery(LargeSceneryElement {
            entry: builtin::BILLBOARD,
            sequence: rng.gen_range(0..2),
            primary: random_colour(rng),
            secondary: random_colour(rng),
            banner: Some(OTHER),
        }),
    };
    TileElement::new(base, base + 2, direction, kind)
}

fn target_sign(rng: &mut ChaCha8Rng, kind: SignKind) -> TileElement {
    let base = rng.gen_range(0..40u8);
    let element_kind = match kind {
        SignKind::LargeScenery => TileElementKind::LargeScenery(LargeSceneryElement {
            entry: builtin::BILLBOARD,
            sequence: rng.gen_range(0..2),
            primary: random_colour(rng),
            secondary: random_colour(rng),
            banner: Some(TARGET),
        }),
        SignKind::Wall => TileElementKind::Wall(WallElement {
            entry: builtin::SCROLLING_WALL_SIGN,
            primary: random_colour(rng),
            secondary: random_colour(rng),
            tertiary: Colour::BLACK,
            banner: Some(TARGET),
        }),
    };
    TileElement::new(base, base + 3, Direction::from_index(rng.gen_range(0..4)), element_kind)
}

fn random_stack(rng: &mut ChaCha8Rng, kind: SignKind) -> Vec<TileElement> {
    let mut stack: Vec<TileElement> = (0..rng.gen_range(0..12)).map(|_| random_filler(rng)).collect();
    if rng.gen_bool(0.8) {
        stack.push(target_sign(rng, kind));
    }
    stack
}

fn random_tile(rng: &mut ChaCha8Rng) -> TileCoords {
    TileCoords::new(rng.gen_range(0..MAP as i32), rng.gen_range(0..MAP as i32))
}

fn store_with(stack: &[TileElement], tile: TileCoords) -> TileElementStore {
    let mut store = TileElementStore::with_flat_surface(MAP, MAP, true);
    for element in stack {
        store.insert(tile, *element);
    }
    store
}

/// Straight reading of the matching rule over an already ordered stack.
fn expected_index(stack: &[TileElement], kind: SignKind) -> Option<usize> {
    stack.iter().position(|element| match (&element.kind, kind) {
        (TileElementKind::LargeScenery(large), SignKind::LargeScenery) => large.banner == Some(TARGET),
        (TileElementKind::Wall(wall), SignKind::Wall) => {
            wall.entry == builtin::SCROLLING_WALL_SIGN && wall.banner == Some(TARGET)
        }
        _ => false,
    })
}

#[test]
fn test_locate_is_position_independent() {
    let scenery = SceneryRegistry::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);

    for _ in 0..200 {
        let kind = if rng.gen_bool(0.5) {
            SignKind::LargeScenery
        } else {
            SignKind::Wall
        };
        let stack = random_stack(&mut rng, kind);
        let first_tile = random_tile(&mut rng);
        let second_tile = random_tile(&mut rng);

        let first_store = store_with(&stack, first_tile);
        let second_store = store_with(&stack, second_tile);
        let first = locate(&first_store, &scenery, first_tile, TARGET, kind);
        let second = locate(&second_store, &scenery, second_tile, TARGET, kind);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.position, first_tile);
                assert_eq!(b.position, second_tile);
                assert_eq!(
                    (a.stack_index, a.base_height, a.direction, a.sequence, a.entry, a.primary, a.secondary),
                    (b.stack_index, b.base_height, b.direction, b.sequence, b.entry, b.primary, b.secondary)
                );
            }
            (Err(NotFound), Err(NotFound)) => {}
            (a, b) => panic!("results differ between tiles: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn test_locate_returns_lowest_match() {
    let scenery = SceneryRegistry::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let kind = if rng.gen_bool(0.5) {
            SignKind::Wall
        } else {
            SignKind::LargeScenery
        };
        let mut stack = random_stack(&mut rng, kind);
        // Occasionally a corrupt duplicate above or below the first sign.
        if rng.gen_bool(0.3) {
            stack.push(target_sign(&mut rng, kind));
        }
        let tile = random_tile(&mut rng);
        let store = store_with(&stack, tile);
        let ordered = store.first_element_at(tile).unwrap();

        let found = locate(&store, &scenery, tile, TARGET, kind).ok().map(|handle| handle.stack_index);
        assert_eq!(found, expected_index(ordered, kind));
        if let Some(index) = found {
            assert_eq!(ordered[index].banner(), Some(TARGET));
        }
    }
}

#[test]
fn test_locate_never_crosses_kinds() {
    let scenery = SceneryRegistry::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..100 {
        let tile = random_tile(&mut rng);
        let store = store_with(&[target_sign(&mut rng, SignKind::Wall)], tile);
        assert_eq!(
            locate(&store, &scenery, tile, TARGET, SignKind::LargeScenery),
            Err(NotFound)
        );
        assert!(locate(&store, &scenery, tile, TARGET, SignKind::Wall).is_ok());
    }
}
