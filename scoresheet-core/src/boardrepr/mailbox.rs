//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Files x Ranks where each index may hold the
//! id of the piece occupying that square, or be empty.

use std::ops::{Index, IndexMut};

use crate::coretypes::{PieceId, Square, NUM_FILES, NUM_RANKS, NUM_SQUARES};

/// Classic 8x8 square board representation of Chess board.
/// Mailbox is Square-Centric, meaning it indexes by square to get a piece,
/// as opposed to a PieceArena which indexes by piece to get a square.
/// Index follows square id order.
/// A8 = idx 0
/// B8 = idx 1
/// A7 = idx 8
/// H1 = idx 63
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mailbox {
    board: [Option<PieceId>; Self::SIZE],
}

impl Mailbox {
    pub const FILES: usize = NUM_FILES;
    pub const RANKS: usize = NUM_RANKS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Creates an empty Mailbox, where all squares are None.
    pub fn new() -> Self {
        Mailbox {
            board: [None; Mailbox::SIZE],
        }
    }

    pub fn board(&self) -> &[Option<PieceId>; Self::SIZE] {
        &self.board
    }

    /// Iterate every square in id order with its occupant.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<PieceId>)> + '_ {
        Square::iter().zip(self.board.iter().copied())
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<PieceId>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.id()]
    }
}

impl IndexMut<Square> for Mailbox {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.board[square.id()]
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::new()
    }
}
