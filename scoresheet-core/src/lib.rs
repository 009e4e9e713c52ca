//! Scoresheet core: a chess position tracker that applies moves written in
//! algebraic notation and reads and writes position strings.

pub mod boardrepr;
pub mod command;
pub mod console;
pub mod coretypes;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod movelist;
pub mod notation;
pub mod options;
pub mod position;

pub use game::Game;
pub use position::Position;
