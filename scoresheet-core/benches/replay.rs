use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scoresheet_core::fen::Fen;
use scoresheet_core::*;

const OPERA_GAME: [&str; 33] = [
    "e4", "e5", "Nf3", "d6", "d4", "Bg4", "dxe5", "Bxf3", "Qxf3", "dxe5", "Bc4", "Nf6", "Qb3",
    "Qe7", "Nc3", "c6", "Bg5", "b5", "Nxb5", "cxb5", "Bxb5+", "Nbd7", "O-O-O", "Rd8", "Rxd7",
    "Rxd7", "Rd1", "Qe6", "Bxd7+", "Nxd7", "Qb8+", "Nxb8", "Rd8#",
];

pub fn criterion_replay_benchmark(c: &mut Criterion) {
    let start_position = Position::start_position();

    c.bench_function("start_position: parse_move Nf3", |b| {
        b.iter(|| {
            let move_ = start_position.parse_move(black_box("Nf3")).unwrap();
            assert!(!move_.is_capture());
        })
    });

    c.bench_function("start_position: replay opera game", |b| {
        b.iter(|| {
            let game = Game::new(start_position.clone(), black_box(OPERA_GAME)).unwrap();
            assert_eq!(game.position.history().len(), OPERA_GAME.len());
        })
    });

    c.bench_function("start_position: replay opera game with fen", |b| {
        b.iter(|| {
            let mut position = start_position.clone();
            for token in OPERA_GAME {
                position.do_move(black_box(token)).unwrap();
                black_box(position.to_fen());
            }
        })
    });
}

criterion_group!(benches, criterion_replay_benchmark);
criterion_main!(benches);
