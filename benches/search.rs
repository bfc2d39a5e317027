use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use tictactoe_rust::board::{Board, Mark};
use tictactoe_rust::playout::run_matches;
use tictactoe_rust::search::choose_move;

fn bench_single_move_empty_board() {
    let board = Board::new();
    black_box(choose_move(black_box(&board), Mark::X, Mark::O));
}

fn bench_single_move_reply() {
    let board: Board = "....X....".parse().unwrap();
    black_box(choose_move(black_box(&board), Mark::O, Mark::X));
}

fn bench_single_move_mid_game() {
    let board: Board = "X...O...X".parse().unwrap();
    black_box(choose_move(black_box(&board), Mark::O, Mark::X));
}

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.sample_size(10);

    group.bench_function("single_move_empty", |b| {
        b.iter(bench_single_move_empty_board)
    });

    group.bench_function("single_move_reply", |b| b.iter(bench_single_move_reply));

    group.bench_function("single_move_mid_game", |b| {
        b.iter(bench_single_move_mid_game)
    });

    group.bench_function("10_games_vs_random", |b| {
        b.iter(|| run_matches(black_box(10), 1).unwrap())
    });

    group.finish();
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
