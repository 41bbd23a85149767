use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kaboom_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomGridGenerator::new(seed).generate(black_box(difficulty.config()))
                })
            },
        );
    }

    // dense enough to take the shuffle path
    let dense = BoardConfig::new_unchecked(24, 24, 500);
    group.bench_function("dense", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            RandomGridGenerator::new(seed).generate(black_box(dense))
        })
    });
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let grid = Grid::from_mine_coords((24, 24), &[(12, 12)]).unwrap();
    c.bench_function("cascade/open_board", |b| {
        b.iter_batched(
            || Game::with_grid(Difficulty::Hard, grid.clone(), 0),
            |mut game| game.reveal(black_box((0, 0))),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
