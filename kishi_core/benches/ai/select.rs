//! `kishi_core::ai` の性能計測（難易度別の1手選択、静的評価）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use kishi_core::ai::types::Ai;
use kishi_core::{ai, engine};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 指定手数だけランダムに進めた局面を返す（途中で終局した場合はその時点で止める）。
fn position_after_plies(plies: u16) -> engine::Position {
    let mut agent = ai::random::Agent::seeded(u64::MIN);
    let mut game = engine::Game::initial();

    for _turn in u16::MIN..plies {
        let position = game.position().clone();
        let Ok(mv) = agent.select_move(&position) else {
            break;
        };
        if game.play(&mv).is_err() || game.is_game_over() {
            break;
        }
    }

    game.position().clone()
}

/// ベンチ用に代表局面をいくつか用意する。
fn position_samples() -> [engine::Position; 3] {
    let p0 = engine::Position::initial();
    let p1 = position_after_plies(10);
    let p2 = position_after_plies(30);
    [p0, p1, p2]
}

/// 難易度ごとの `select_move` を計測する。
fn bench_select_move(criterion: &mut Criterion) {
    let samples = position_samples();

    for difficulty in ai::Difficulty::ALL {
        let mut group = criterion.benchmark_group(format!("ai/select_move/{difficulty}"));
        for (index, position) in samples.iter().enumerate() {
            let bench_id = BenchmarkId::new("pos", index);
            group.bench_with_input(bench_id, position, |bench, input| {
                bench.iter_batched(
                    || ai::Opponent::seeded(difficulty, u64::MIN),
                    |mut opponent| black_box(opponent.select_move(input)),
                    BatchSize::SmallInput,
                );
            });
        }
        group.finish();
    }
}

/// `eval::evaluate` を計測する。
fn bench_evaluate(criterion: &mut Criterion) {
    let position = position_after_plies(20);
    criterion.bench_function("ai/evaluate", |bench| {
        bench.iter(|| black_box(ai::eval::evaluate(black_box(&position))));
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_select_move(&mut criterion);
    bench_evaluate(&mut criterion);
    criterion.final_summary();
}
