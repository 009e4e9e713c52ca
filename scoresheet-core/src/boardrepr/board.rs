//! Board pairs a Mailbox with a PieceArena and keeps them mutually consistent.

use std::fmt::{self, Display};

use crate::boardrepr::{Mailbox, PieceArena};
use crate::coretypes::{Color, Piece, PieceId, Square, NUM_FILES, NUM_RANKS};

/// Square slots and piece records, each side holding the other's index.
/// Invariant: `mailbox[s] == Some(p)` if and only if `arena[p].square == Some(s)`.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Board {
    mailbox: Mailbox,
    arena: PieceArena,
}

impl Board {
    /// Creates a Board with no pieces.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn arena(&self) -> &PieceArena {
        &self.arena
    }

    /// Id of the piece on a square.
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        self.mailbox[square]
    }

    /// The piece on a square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square].map(|id| self.arena[id].piece)
    }

    pub fn piece(&self, id: PieceId) -> Piece {
        self.arena[id].piece
    }

    /// Square a piece stands on, None once captured.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.arena[id].square
    }

    /// Returns true if a piece of `color` stands on square.
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == color)
    }

    /// Create a new piece, unbound.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        self.arena.push(piece)
    }

    /// Create a new piece and bind it to square.
    pub(crate) fn place(&mut self, piece: Piece, square: Square) -> PieceId {
        let id = self.add_piece(piece);
        self.bind(id, square);
        id
    }

    /// Bind a piece to a square.
    /// Both sides of the piece's previous binding and of the square's previous
    /// occupant are cleared first.
    pub(crate) fn bind(&mut self, id: PieceId, square: Square) {
        if self.mailbox[square] == Some(id) {
            return;
        }
        self.unbind_piece(id);
        self.unbind_square(square);
        self.mailbox[square] = Some(id);
        self.arena.set_square(id, Some(square));
    }

    /// Take a piece off the board, leaving it in the arena.
    pub(crate) fn unbind_piece(&mut self, id: PieceId) {
        if let Some(square) = self.arena[id].square {
            self.mailbox[square] = None;
            self.arena.set_square(id, None);
        }
    }

    /// Empty a square, unbinding its occupant.
    pub(crate) fn unbind_square(&mut self, square: Square) {
        if let Some(id) = self.mailbox[square].take() {
            self.arena.set_square(id, None);
        }
    }

    /// Returns true if every binding is mirrored on both sides.
    pub fn is_consistent(&self) -> bool {
        let squares_agree = self
            .mailbox
            .iter()
            .all(|(square, occupant)| match occupant {
                Some(id) => self.arena[id].square == Some(square),
                None => true,
            });
        let pieces_agree = self
            .arena
            .iter()
            .all(|(id, record)| match record.square {
                Some(square) => self.mailbox[square] == Some(id),
                None => true,
            });
        squares_agree && pieces_agree
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for row in 0..NUM_RANKS as i8 {
            pretty.push_str("| ");

            for column in 0..NUM_FILES as i8 {
                let maybe_piece = Square::from_coords(row, column).and_then(|sq| self.piece_at(sq));
                pretty.push(match maybe_piece {
                    Some(piece) => char::from(piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(NUM_RANKS as i8 - row).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
