//! Absolute pin detection.
//!
//! A piece is absolutely pinned when it is the only piece standing between its
//! own king and an enemy slider that attacks along that line. A pinned piece
//! may only capture its pinner.

use arrayvec::ArrayVec;

use crate::boardrepr::Board;
use crate::coretypes::{Color, PieceId, PieceKind, MAX_PINS};
use crate::movegen::rays::{self, Direction};

/// A pinned piece and the enemy piece pinning it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pin {
    pub pinned: PieceId,
    pub pinner: PieceId,
}

/// Pins found for one or more kings.
/// Pins describe a single board state and are recomputed before every use.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Pins(ArrayVec<Pin, MAX_PINS>);

impl Pins {
    /// No pins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find all pins against the first king of each color, in reading order.
    /// Further kings of the same color are not analyzed.
    pub fn for_both_kings(board: &Board) -> Self {
        let mut pins = Self::new();
        for color in Color::iter() {
            if let Some((king, _)) = board.arena().find(color, PieceKind::King) {
                pins.add_king(board, king);
            }
        }
        pins
    }

    /// Find all pins against a single king.
    pub fn for_king(board: &Board, king: PieceId) -> Self {
        let mut pins = Self::new();
        pins.add_king(board, king);
        pins
    }

    /// Cast the 8 rays from a king and record each pin found.
    fn add_king(&mut self, board: &Board, king: PieceId) {
        for direction in rays::ALL_DIRECTIONS {
            if let Some(pin) = scan_ray(board, king, direction) {
                self.0.push(pin);
            }
        }
    }

    /// The piece pinning `id`, if `id` is pinned.
    pub fn pinner_of(&self, id: PieceId) -> Option<PieceId> {
        self.0
            .iter()
            .find(|pin| pin.pinned == id)
            .map(|pin| pin.pinner)
    }

    pub fn is_pinned(&self, id: PieceId) -> bool {
        self.pinner_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns true if a piece kind attacks along a ray of the given geometry.
const fn slides_along(piece_kind: PieceKind, direction: Direction) -> bool {
    if !piece_kind.is_sliding() {
        return false;
    }
    match piece_kind {
        PieceKind::Rook => rays::is_orthogonal(direction),
        PieceKind::Bishop => !rays::is_orthogonal(direction),
        _ => true,
    }
}

/// Walk one ray out from a king.
/// The first friendly piece met becomes the pin candidate and the scan continues past it.
/// With a candidate, an enemy slider of matching geometry pins it.
/// Any other piece ends the ray with no pin.
fn scan_ray(board: &Board, king: PieceId, direction: Direction) -> Option<Pin> {
    let king_square = board.square_of(king)?;
    let color = board.piece(king).color;
    let mut candidate: Option<PieceId> = None;

    for square in rays::ray(king_square, direction) {
        let occupant = match board.occupant(square) {
            Some(occupant) => occupant,
            None => continue,
        };
        let piece = board.piece(occupant);

        match candidate {
            None if piece.color == color => candidate = Some(occupant),
            Some(pinned) if piece.color != color && slides_along(piece.piece_kind, direction) => {
                return Some(Pin {
                    pinned,
                    pinner: occupant,
                });
            }
            _ => return None,
        }
    }
    None
}
