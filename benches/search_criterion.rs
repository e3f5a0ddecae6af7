use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_checkers::game_state::checkers_rules::Rules;
use plum_checkers::game_state::game_state::GameState;
use plum_checkers::move_generation::perft::perft;
use plum_checkers::move_generation::successor_generator::LegalSuccessorGenerator;
use plum_checkers::search::search_engine::{SearchAlgorithm, SearchConfig, SearchEngine};

const OPENING_PERFT: &[usize] = &[7, 49, 302];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_opening");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);

    let game = GameState::new_game(Rules::default());
    let generator = LegalSuccessorGenerator;

    for (depth_idx, expected_nodes) in OPENING_PERFT.iter().enumerate() {
        let depth = (depth_idx + 1) as u8;

        // Correctness guard before benchmarking.
        let warmup = perft(&generator, &game, depth).expect("perft should run");
        assert_eq!(
            warmup.nodes, *expected_nodes,
            "node mismatch in warmup for depth {depth}"
        );

        group.throughput(Throughput::Elements(*expected_nodes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("d{depth}")),
            expected_nodes,
            |b, expected| {
                b.iter(|| {
                    let count = perft(&generator, black_box(&game), black_box(depth))
                        .expect("perft benchmark run should succeed");
                    assert_eq!(count.nodes, *expected);
                    black_box(count.nodes)
                });
            },
        );
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_opening");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let game = GameState::new_game(Rules::default());

    for algorithm in [SearchAlgorithm::MiniMax, SearchAlgorithm::AlphaBeta] {
        for depth in [2u8, 4, 6] {
            let config = SearchConfig {
                algorithm,
                max_depth: depth,
                avoid_stalemate: true,
            };

            let mut engine = SearchEngine::new(config);
            let warmup = engine.select_move(&game).expect("search should run");
            println!(
                "{algorithm} depth {depth}: {} nodes, chose {}",
                warmup.nodes_explored,
                warmup.chosen.action()
            );

            group.bench_function(BenchmarkId::new(algorithm.to_string(), depth), |b| {
                b.iter(|| {
                    let result = engine
                        .select_move(black_box(&game))
                        .expect("search benchmark run should succeed");
                    black_box(result.nodes_explored)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_perft, bench_search);
criterion_main!(search_benches);
