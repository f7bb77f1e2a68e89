use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hitbox_collision::{overlaps_along_axis, raycast, resolve_axis_move, resolve_sweep, Rect, Vec2};

// --- Helper for building a row of tiles the mover runs into ---
fn tile_row(count: usize, tile: f32) -> Vec<Rect> {
    (0..count)
        .map(|i| Rect::new(i as f32 * tile, 64.0, tile, tile).expect("bench tile is valid"))
        .collect()
}

fn bench_ray_and_sat(c: &mut Criterion) {
    let target = Rect::new(5.0, 0.0, 2.0, 2.0).expect("bench rect is valid");
    let origin = Vec2::new(0.0, 1.0);

    c.bench_function("raycast_hit", |b| {
        b.iter(|| raycast(black_box(origin), black_box(Vec2::new(1.0, 0.25)), black_box(&target)))
    });
    c.bench_function("raycast_parallel_miss", |b| {
        b.iter(|| {
            raycast(
                black_box(Vec2::new(0.0, 10.0)),
                black_box(Vec2::RIGHT),
                black_box(&target),
            )
        })
    });
    c.bench_function("overlaps_along_axis", |b| {
        let mover = Rect::new(0.0, 0.0, 2.0, 2.0).expect("bench rect is valid");
        b.iter(|| {
            overlaps_along_axis(
                black_box(&mover),
                black_box(&target),
                black_box(Vec2::new(3.0, 1.0)),
            )
        })
    });
}

// Resolves a falling box against every tile in a row, the way a tile-world
// caller would after a broadphase query.
fn bench_resolve_against_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_against_row");
    let mover = Rect::new(40.0, 20.0, 12.0, 20.0).expect("bench rect is valid");

    for num_tiles in [8, 64, 512].iter() {
        let tiles = tile_row(*num_tiles, 16.0);
        group.bench_with_input(BenchmarkId::new("swept", num_tiles), &tiles, |b, tiles| {
            b.iter(|| {
                let mut velocity = Vec2::new(3.0, 12.0);
                for tile in tiles {
                    if let Some(resolved) = resolve_sweep(&mover, velocity, tile) {
                        velocity = resolved;
                    }
                }
                black_box(velocity)
            });
        });
        group.bench_with_input(BenchmarkId::new("discrete", num_tiles), &tiles, |b, tiles| {
            b.iter(|| {
                let mut speed = Vec2::new(3.0, 12.0);
                for tile in tiles {
                    speed = resolve_axis_move(&mover, tile, speed);
                }
                black_box(speed)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ray_and_sat, bench_resolve_against_row);
criterion_main!(benches);
