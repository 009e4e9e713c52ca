//! Chess board piece placement representations.
mod board;
mod mailbox;
mod piece_arena;

pub use board::Board;
pub use mailbox::Mailbox;
pub use piece_arena::{PieceArena, PieceRecord};
