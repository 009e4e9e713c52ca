//! Piece-Centric representation of a chess board.

use std::ops::Index;

use crate::coretypes::{Color, Piece, PieceId, PieceKind, Square};

/// A piece and the square it stands on, None once captured.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PieceRecord {
    pub(crate) piece: Piece,
    pub(crate) square: Option<Square>,
}

/// An append-only arena of every piece ever placed in a position.
/// PieceArena indexes by piece to get a square, as opposed to Mailbox which
/// indexes by square to get a piece.
/// Captured pieces stay in the arena with no square, so a PieceId is never reused.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct PieceArena {
    records: Vec<PieceRecord>,
}

impl PieceRecord {
    pub const fn piece(&self) -> &Piece {
        &self.piece
    }
    pub const fn square(&self) -> &Option<Square> {
        &self.square
    }
}

impl PieceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unbound piece, returning its new id.
    pub(crate) fn push(&mut self, piece: Piece) -> PieceId {
        self.records.push(PieceRecord {
            piece,
            square: None,
        });
        PieceId(self.records.len() - 1)
    }

    pub(crate) fn set_square(&mut self, id: PieceId, square: Option<Square>) {
        self.records[id.0].square = square;
    }

    /// Number of pieces ever placed, captured ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate all pieces in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &PieceRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (PieceId(index), record))
    }

    /// Iterate pieces still on the board.
    pub fn bound(&self) -> impl Iterator<Item = (PieceId, Piece, Square)> + '_ {
        self.iter()
            .filter_map(|(id, record)| record.square.map(|square| (id, record.piece, square)))
    }

    /// The first bound piece of a color and kind, in placement order.
    pub fn find(&self, color: Color, piece_kind: PieceKind) -> Option<(PieceId, Square)> {
        let wanted = Piece::new(color, piece_kind);
        self.bound()
            .find(|(_, piece, _)| *piece == wanted)
            .map(|(id, _, square)| (id, square))
    }
}

impl Index<PieceId> for PieceArena {
    type Output = PieceRecord;
    fn index(&self, id: PieceId) -> &Self::Output {
        &self.records[id.0]
    }
}
