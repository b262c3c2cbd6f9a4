use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use warden::{perft, Board, Color, Game, MoveRequest, Position, Setup};

const MIDDLEGAME: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1";

fn middlegame() -> Game {
    let setup: Setup = MIDDLEGAME.parse().expect("valid placement");
    Game::from_setup(&setup, Color::Black).expect("legal setup")
}

fn bench_perft(c: &mut Criterion) {
    let game = Game::new();
    c.bench_function("perft 3", |b| {
        b.iter(|| assert_eq!(perft(black_box(&game), 3), 40_768))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let game = middlegame();
    c.bench_function("legal moves", |b| {
        b.iter(|| assert_eq!(black_box(&game).legal_moves().len(), 47))
    });
}

fn bench_validate(c: &mut Criterion) {
    let game = middlegame();
    let request: MoveRequest = "f8 e7".parse().expect("valid request");
    c.bench_function("validate", |b| {
        b.iter(|| black_box(&game).validate(black_box(request)))
    });
}

fn bench_threats(c: &mut Criterion) {
    let board = Board::new();
    let square = Position::new(4, 2);
    c.bench_function("is threatened", |b| {
        b.iter(|| black_box(&board).is_threatened(black_box(square), Color::Black))
    });
}

criterion_group!(benches, bench_perft, bench_legal_moves, bench_validate, bench_threats);
criterion_main!(benches);
