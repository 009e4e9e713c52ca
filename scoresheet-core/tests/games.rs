//! Games
//!
//! Replays complete games from their scoresheets and checks the position
//! strings reached along the way.

use scoresheet_core::coretypes::{Castling, Color};
use scoresheet_core::error::ErrorKind;
use scoresheet_core::fen::Fen;
use scoresheet_core::*;

/// Replay tokens from a base position and compare the final position string.
fn replay_tester(base_fen: &str, tokens: &str, expected_fen: &str) -> Game {
    let base = Position::parse_fen(base_fen).unwrap();
    let game = Game::new(base, tokens.split_whitespace()).unwrap();
    assert_eq!(game.position.to_fen(), expected_fen);
    assert_eq!(game.moves.len(), tokens.split_whitespace().count());
    assert_eq!(game.position.history().len(), game.moves.len());
    assert!(game.position.board().is_consistent());
    game
}

#[test]
fn scholars_mate() {
    replay_tester(
        fen::START_FEN,
        "e4 e5 Bc4 Nc6 Qh5 Nf6 Qxf7#",
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    );
}

#[test]
fn ruy_lopez_castles_kingside() {
    let game = replay_tester(
        fen::START_FEN,
        "e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7",
        "r1bqk2r/1pppbppp/p1n2n2/4p3/B3P3/5N2/PPPP1PPP/RNBQ1RK1 w kq - 4 6",
    );
    let castle = &game.position.history()[8];
    assert!(castle.is_castling());
    assert_eq!(*castle.player(), Color::White);
}

#[test]
fn opera_game() {
    let tokens = "e4 e5 Nf3 d6 d4 Bg4 dxe5 Bxf3 Qxf3 dxe5 Bc4 Nf6 Qb3 Qe7 \
                  Nc3 c6 Bg5 b5 Nxb5 cxb5 Bxb5+ Nbd7 O-O-O Rd8 Rxd7 Rxd7 \
                  Rd1 Qe6 Bxd7+ Nxd7 Qb8+ Nxb8 Rd8#";
    let game = replay_tester(
        fen::START_FEN,
        tokens,
        "1n1Rkb1r/p4ppp/4q3/4p1B1/4P3/8/PPP2PPP/2K5 b k - 1 17",
    );
    assert_eq!(
        game.position.history().iter().filter(|m| m.is_capture()).count(),
        12
    );
}

#[test]
fn en_passant_then_recapture() {
    replay_tester(
        fen::START_FEN,
        "e4 a6 e5 d5 exd6 cxd6",
        "rnbqkbnr/1p2pppp/p2p4/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 4",
    );
}

#[test]
fn promotion_and_underpromotion() {
    replay_tester(
        "4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1",
        "b8=Q+ Kd7 Kd2 g1=N",
        "1Q6/3k4/8/8/8/8/3K4/6n1 w - - 0 3",
    );
}

#[test]
fn capture_of_corner_rook_clears_castling() {
    let game = replay_tester(
        "r3k2r/8/8/8/8/8/6B1/4K3 w kq - 0 1",
        "Bxa8+ O-O",
        "B4rk1/8/8/8/8/8/8/4K3 w - - 1 2",
    );
    assert_eq!(*game.base_position.castling(), Castling::B_SIDE);
    assert!(game.position.castling().is_none());

    let err = Game::new(game.base_position.clone(), ["Bxa8", "O-O-O"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GameIllegalMove);
}

#[test]
fn replay_from_back_rank() {
    let base = Position::from_back_rank("rnbqkbnr").unwrap();
    assert_eq!(base, Position::start_position());

    let base = Position::from_back_rank("nrbqkbrn").unwrap();
    let game = Game::new(base, ["Ng3", "Nb6"]).unwrap();
    assert_eq!(
        game.position.to_fen(),
        "1rbqkbrn/pppppppp/1n6/8/8/6N1/PPPPPPPP/NRBQKBR1 w KQkq - 2 2"
    );
}
