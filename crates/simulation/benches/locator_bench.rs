//! Criterion benchmarks for sign lookup.
//!
//! Benchmarks:
//!   - locate on a tile where the sign sits at the bottom of the stack
//!   - locate on a tall stack where the sign is the topmost element
//!   - locate miss on a tall stack (full scan)
//!   - query_action for a rename, which locates nothing but validates
//!
//! Run with: cargo bench -p simulation --bench locator_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::banner::{BannerFlags, BannerId, BannerRegistry};
use simulation::colour::Colour;
use simulation::coords::{Direction, TileCoords};
use simulation::element_locator::{locate, SignKind};
use simulation::game_actions::{query_action, GameAction, ParkContext};
use simulation::park::{ParkFinance, ParkPermissions};
use simulation::scenery::{builtin, SceneryRegistry};
use simulation::tile_elements::{TileElement, TileElementKind, TileElementStore, WallElement};

const TILE: TileCoords = TileCoords::new(10, 10);
const SIGN: BannerId = BannerId(0);

fn wall_sign(base: u8, banner: BannerId) -> TileElement {
    TileElement::new(
        base,
        base + 3,
        Direction::South,
        TileElementKind::Wall(WallElement {
            entry: builtin::SCROLLING_WALL_SIGN,
            primary: Colour::WHITE,
            secondary: Colour::BLACK,
            tertiary: Colour::BLACK,
            banner: Some(banner),
        }),
    )
}

/// A tile with `fillers` path elements below a single wall sign.
fn store_with_stack(fillers: u8) -> TileElementStore {
    let mut store = TileElementStore::with_flat_surface(32, 32, true);
    for base in 0..fillers {
        store.insert(
            TILE,
            TileElement::new(base, base + 1, Direction::West, TileElementKind::Path { entry: 0 }),
        );
    }
    store.insert(TILE, wall_sign(fillers, SIGN));
    store
}

// ---------------------------------------------------------------------------
// Benchmark: locate
// ---------------------------------------------------------------------------

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_locate");
    group.sample_size(1000);

    let scenery = SceneryRegistry::default();
    let shallow = store_with_stack(0);
    let tall = store_with_stack(60);

    group.bench_function("sign_at_bottom", |b| {
        b.iter(|| black_box(locate(&shallow, &scenery, black_box(TILE), SIGN, SignKind::Wall)));
    });

    group.bench_function("sign_on_top_of_60", |b| {
        b.iter(|| black_box(locate(&tall, &scenery, black_box(TILE), SIGN, SignKind::Wall)));
    });

    group.bench_function("miss_on_60", |b| {
        b.iter(|| {
            black_box(locate(
                &tall,
                &scenery,
                black_box(TILE),
                BannerId(99),
                SignKind::Wall,
            ))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: query phase
// ---------------------------------------------------------------------------

fn bench_query_rename(c: &mut Criterion) {
    let mut tiles = store_with_stack(4);
    let mut banners = BannerRegistry::default();
    let scenery = SceneryRegistry::default();
    let mut finance = ParkFinance::default();
    let permissions = ParkPermissions::default();
    banners.create(
        TILE,
        BannerFlags {
            is_large_scenery: false,
            is_wall: true,
        },
    );
    let park = ParkContext {
        tiles: &mut tiles,
        banners: &mut banners,
        scenery: &scenery,
        finance: &mut finance,
        permissions: &permissions,
    };
    let action = GameAction::SignSetName {
        banner_id: SIGN,
        name: "Haunted House".to_string(),
    };

    c.bench_function("query_sign_set_name", |b| {
        b.iter(|| black_box(query_action(black_box(&action), &park)));
    });
}

criterion_group!(benches, bench_locate, bench_query_rename);
criterion_main!(benches);
