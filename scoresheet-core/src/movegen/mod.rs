//! Pseudo-legal destination generation.
//!
//! Destinations are computed per piece by walking the board from the piece's square.
//! They do not account for whether a move leaves its own king in check,
//! with the exception of absolute pins, which are applied uniformly.

use crate::boardrepr::Board;
use crate::coretypes::{Castling, CastlingSide, Color, PieceId, PieceKind, Rank, Square};
use crate::movelist::SquareList;

pub mod pins;
pub mod rays;

pub use pins::{Pin, Pins};

use rays::Direction;

/// The board state a piece's destinations depend on, besides the piece itself.
#[derive(Debug, Copy, Clone)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub en_passant: Option<Square>,
    pub castling: Castling,
}

impl<'a> MoveContext<'a> {
    pub fn new(board: &'a Board, en_passant: Option<Square>, castling: Castling) -> Self {
        Self {
            board,
            en_passant,
            castling,
        }
    }
}

/// Pseudo-legal destinations of a piece, restricted by pins.
/// A pinned piece may only capture its pinner, so its destinations are
/// either the pinner's square or nothing.
pub fn destinations(ctx: &MoveContext, id: PieceId, pins: &Pins) -> SquareList {
    let unrestricted = unrestricted_destinations(ctx, id);

    match pins
        .pinner_of(id)
        .and_then(|pinner| ctx.board.square_of(pinner))
    {
        Some(pinner_square) => {
            let mut restricted = SquareList::new();
            if unrestricted.contains(&pinner_square) {
                restricted.push(pinner_square);
            }
            restricted
        }
        None => unrestricted,
    }
}

/// Pseudo-legal destinations of a piece, ignoring pins.
/// A captured piece has no destinations.
pub fn unrestricted_destinations(ctx: &MoveContext, id: PieceId) -> SquareList {
    let mut list = SquareList::new();
    let square = match ctx.board.square_of(id) {
        Some(square) => square,
        None => return list,
    };
    let piece = ctx.board.piece(id);

    let (board, color) = (ctx.board, piece.color);

    match piece.piece_kind {
        PieceKind::Pawn => pawn_destinations(&mut list, ctx, square, color),
        PieceKind::Knight => {
            step_destinations(&mut list, board, square, color, &rays::KNIGHT_JUMPS)
        }
        PieceKind::Bishop => slide_destinations(&mut list, board, square, color, &rays::DIAGONAL),
        PieceKind::Rook => slide_destinations(&mut list, board, square, color, &rays::ORTHOGONAL),
        PieceKind::Queen => {
            slide_destinations(&mut list, board, square, color, &rays::ALL_DIRECTIONS)
        }
        PieceKind::King => {
            step_destinations(&mut list, board, square, color, &rays::ALL_DIRECTIONS);
            castling_destinations(&mut list, ctx, square, color);
        }
    }
    list
}

/// Single push onto an empty square, double push from the pawn rank through
/// two empty squares, and diagonal captures of enemies or the en passant target.
fn pawn_destinations(list: &mut SquareList, ctx: &MoveContext, from: Square, color: Color) {
    let forward = color.forward();

    if let Some(single) = from.offset(forward, 0) {
        if ctx.board.occupant(single).is_none() {
            list.push(single);

            if from.rank() == color.pawn_rank() {
                if let Some(double) = from.offset(2 * forward, 0) {
                    if ctx.board.occupant(double).is_none() {
                        list.push(double);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = from.offset(forward, side) {
            if ctx.board.is_color(target, !color) || is_en_passant_target(ctx, target, color) {
                list.push(target);
            }
        }
    }
}

/// Returns true if `target` is the en passant square a pawn of `color` may capture onto.
/// The target sits behind an enemy pawn's double push, on rank 6 for white and rank 3 for black.
pub(crate) fn is_en_passant_target(ctx: &MoveContext, target: Square, color: Color) -> bool {
    let capture_rank = match color {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    };
    ctx.en_passant == Some(target) && target.rank() == capture_rank
}

/// Fixed single-step offsets, any square not holding a friendly piece.
fn step_destinations(
    list: &mut SquareList,
    board: &Board,
    from: Square,
    color: Color,
    steps: &[Direction],
) {
    for &(rows, columns) in steps {
        if let Some(to) = from.offset(rows, columns) {
            if !board.is_color(to, color) {
                list.push(to);
            }
        }
    }
}

/// Each ray runs until the board edge or the first occupied square,
/// which is included only if it holds an enemy piece.
fn slide_destinations(
    list: &mut SquareList,
    board: &Board,
    from: Square,
    color: Color,
    directions: &[Direction],
) {
    for &direction in directions {
        for to in rays::ray(from, direction) {
            match board.piece_at(to) {
                None => list.push(to),
                Some(piece) => {
                    if piece.color != color {
                        list.push(to);
                    }
                    break;
                }
            }
        }
    }
}

/// The king's two-square castling destinations.
/// Requires the castling right, a rook on that side, and room for both pieces to land.
/// Check and attacked transit squares are not considered.
fn castling_destinations(
    list: &mut SquareList,
    ctx: &MoveContext,
    king_square: Square,
    color: Color,
) {
    for side in [CastlingSide::King, CastlingSide::Queen] {
        let castle = castling_rook_and_destination(ctx, king_square, color, side);
        if let Some((_, destination)) = castle {
            if !list.contains(&destination) {
                list.push(destination);
            }
        }
    }
}

/// Returns the castling rook and the king's destination if castling to `side` is available.
pub(crate) fn castling_rook_and_destination(
    ctx: &MoveContext,
    king_square: Square,
    color: Color,
    side: CastlingSide,
) -> Option<((PieceId, Square), Square)> {
    if !ctx.castling.has(Castling::right(color, side)) || king_square.rank() != color.back_rank() {
        return None;
    }
    let destination = castling_destination(king_square, side);
    if destination == king_square {
        return None;
    }
    let (rook, rook_square) = castling_rook(ctx.board, king_square, color, side)?;

    match is_castling_clear(ctx.board, king_square, rook_square, side) {
        true => Some(((rook, rook_square), destination)),
        false => None,
    }
}

/// Square the king lands on when castling to `side`.
pub fn castling_destination(king_square: Square, side: CastlingSide) -> Square {
    Square::from((side.king_file(), king_square.rank()))
}

/// Square the rook lands on when castling to `side`.
pub fn castling_rook_destination(king_square: Square, side: CastlingSide) -> Square {
    Square::from((side.rook_file(), king_square.rank()))
}

/// The outermost rook of `color` on the king's rank toward `side`.
pub fn castling_rook(
    board: &Board,
    king_square: Square,
    color: Color,
    side: CastlingSide,
) -> Option<(PieceId, Square)> {
    rays::ray(king_square, (0, side.direction()))
        .filter_map(|square| board.occupant(square).map(|id| (id, square)))
        .filter(|&(id, _)| {
            let piece = board.piece(id);
            piece.color == color && piece.piece_kind == PieceKind::Rook
        })
        .last()
}

/// Returns true if every square of the king's rank spanned by the king, the rook
/// and both of their landing squares is empty or holds the king or the rook.
pub fn is_castling_clear(
    board: &Board,
    king_square: Square,
    rook_square: Square,
    side: CastlingSide,
) -> bool {
    if king_square.row() != rook_square.row() {
        return false;
    }
    let (king, rook) = match (board.occupant(king_square), board.occupant(rook_square)) {
        (Some(king), Some(rook)) => (king, rook),
        _ => return false,
    };

    let columns = [
        king_square.column(),
        rook_square.column(),
        side.king_file() as i8,
        side.rook_file() as i8,
    ];
    let low = columns.iter().copied().fold(i8::MAX, i8::min);
    let high = columns.iter().copied().fold(i8::MIN, i8::max);

    (low..=high)
        .filter_map(|column| Square::from_coords(king_square.row(), column))
        .all(|square| match board.occupant(square) {
            Some(id) => id == king || id == rook,
            None => true,
        })
}
