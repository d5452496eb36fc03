use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sapper_core::{Board, Difficulty, Game, MineGenerator, RandomMines};

fn first_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_click");
    for difficulty in Difficulty::ALL {
        let settings = difficulty.settings();
        let center = (settings.width() / 2, settings.height() / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &settings,
            |b, &settings| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    let mut game = Game::new(settings, seed);
                    black_box(game.click(center)).ok();
                    game
                })
            },
        );
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for difficulty in Difficulty::ALL {
        let settings = difficulty.settings();
        let mut mined = Board::new(&settings);
        RandomMines::new(0xdecade)
            .place_mines(&mut mined, &settings, (0, 0))
            .expect("preset settings always fit their mines");
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &mined,
            |b, mined| {
                b.iter(|| {
                    let mut board = mined.clone();
                    black_box(board.expand((0, 0)))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, first_click, flood_fill);
criterion_main!(benches);
