use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{find_all_matches, BoardEngine, SwapOutcome};
use tui_match3::types::{BoardConfig, Coord};

fn bench_find_matches(c: &mut Criterion) {
    let engine = BoardEngine::new(BoardConfig::default(), 12345).unwrap();
    let grid = engine.grid().clone();

    c.bench_function("find_all_matches_8x8", |b| {
        b.iter(|| find_all_matches(black_box(&grid)))
    });
}

fn bench_new_board(c: &mut Criterion) {
    c.bench_function("populate_8x8", |b| {
        let mut seed = 0u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            BoardEngine::new(BoardConfig::default(), black_box(seed)).unwrap()
        })
    });
}

/// Every adjacent horizontal swap on a fresh board, accepted ones resolving
/// their full cascade.
fn bench_swap_sweep(c: &mut Criterion) {
    let base = BoardEngine::new(BoardConfig::default(), 777).unwrap();

    c.bench_function("swap_sweep_8x8", |b| {
        b.iter(|| {
            let mut engine = base.clone();
            let mut accepted = 0u32;
            for y in 0..8 {
                for x in 0..7 {
                    if let Ok(SwapOutcome::Accepted(report)) =
                        engine.request_swap(Coord::new(x, y), Coord::new(x + 1, y))
                    {
                        accepted += report.final_combo_depth;
                    }
                }
            }
            black_box(accepted)
        })
    });
}

criterion_group!(benches, bench_find_matches, bench_new_board, bench_swap_sweep);
criterion_main!(benches);
