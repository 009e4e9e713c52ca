//! Short move notation.
//!
//! A token such as `Nf3`, `exd5`, `R1a3`, `e8=Q+` or `O-O` is parsed in two steps.
//! `Notation::from_str` checks the token's shape without looking at a board,
//! then `Notation::resolve` finds the piece that makes the move and produces a `Move`.

use std::str::FromStr;

use crate::coretypes::{
    CastlingMove, CastlingSide, CheckMarker, Color, File, Move, Piece, PieceId, PieceKind, Rank,
    Square,
};
use crate::error::{self, ErrorKind};
use crate::movegen::{self, MoveContext, Pins};

/// Where the moving piece comes from, as far as the token says.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Origin {
    Any,
    File(File),
    Rank(Rank),
    Square(Square),
}

impl Origin {
    /// Returns true if a piece on square may be the moving piece.
    pub fn admits(&self, square: Square) -> bool {
        match self {
            Origin::Any => true,
            Origin::File(file) => square.file() == *file,
            Origin::Rank(rank) => square.rank() == *rank,
            Origin::Square(origin) => square == *origin,
        }
    }
}

/// Every non-castling move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PieceMove {
    pub piece_kind: PieceKind,
    pub origin: Origin,
    /// The token had an `x` before its destination.
    pub capture: bool,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shape {
    Castle(CastlingSide),
    Piece(PieceMove),
}

/// A syntactically valid notation token, not yet resolved against a position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notation {
    token: String,
    check: Option<CheckMarker>,
    shape: Shape,
}

impl Notation {
    pub fn token(&self) -> &str {
        &self.token
    }
    pub fn check(&self) -> &Option<CheckMarker> {
        &self.check
    }
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn error(&self, error_kind: ErrorKind) -> error::Error {
        error::Error::from((error_kind, &self.token))
    }

    /// Resolve this token into a move for `player`.
    /// Nothing is mutated. Pins must describe the board in `ctx`.
    pub fn resolve(&self, ctx: &MoveContext, player: Color, pins: &Pins) -> error::Result<Move> {
        match self.shape {
            Shape::Castle(side) => {
                let (king, king_square) = ctx
                    .board
                    .arena()
                    .find(player, PieceKind::King)
                    .ok_or_else(|| self.error(ErrorKind::NotationIllegalCastling))?;
                self.castling_move(ctx, player, king, king_square, side)
            }
            Shape::Piece(piece_move) => self.resolve_piece_move(ctx, player, pins, &piece_move),
        }
    }

    fn castling_move(
        &self,
        ctx: &MoveContext,
        player: Color,
        king: PieceId,
        king_square: Square,
        side: CastlingSide,
    ) -> error::Result<Move> {
        let ((rook, rook_from), destination) =
            movegen::castling_rook_and_destination(ctx, king_square, player, side)
                .ok_or_else(|| self.error(ErrorKind::NotationIllegalCastling))?;

        Ok(Move {
            player,
            from: king_square,
            to: destination,
            piece: king,
            piece_kind: PieceKind::King,
            captured: None,
            en_passant: false,
            promotion: None,
            castling: Some(CastlingMove {
                side,
                rook,
                rook_from,
                rook_to: movegen::castling_rook_destination(king_square, side),
            }),
            check: self.check,
            notation: self.token.clone(),
        })
    }

    fn resolve_piece_move(
        &self,
        ctx: &MoveContext,
        player: Color,
        pins: &Pins,
        piece_move: &PieceMove,
    ) -> error::Result<Move> {
        let to = piece_move.destination;
        let (piece, from) = self.resolve_source(ctx, player, pins, piece_move)?;

        // A king stepping two files along its rank is castling.
        if piece_move.piece_kind == PieceKind::King
            && from.row() == to.row()
            && (to.column() - from.column()).abs() == 2
        {
            let side = match to.column() > from.column() {
                true => CastlingSide::King,
                false => CastlingSide::Queen,
            };
            return self.castling_move(ctx, player, piece, from, side);
        }

        let is_pawn = piece_move.piece_kind == PieceKind::Pawn;
        let (captured, en_passant) = match ctx.board.occupant(to) {
            Some(target) => (Some((target, to)), false),
            None if is_pawn && to.column() != from.column() => {
                // The passed pawn stands beside the capturing pawn, on the destination file.
                let square = Square::from_coords(from.row(), to.column())
                    .ok_or_else(|| self.error(ErrorKind::NotationUnresolved))?;
                let target = ctx
                    .board
                    .occupant(square)
                    .filter(|&id| ctx.board.piece(id) == Piece::new(!player, PieceKind::Pawn))
                    .ok_or_else(|| self.error(ErrorKind::NotationUnresolved))?;
                (Some((target, square)), true)
            }
            None if piece_move.capture => return Err(self.error(ErrorKind::NotationUnresolved)),
            None => (None, false),
        };

        let reaches_last_rank = is_pawn && to.rank() == (!player).back_rank();
        let promotion = match (piece_move.promotion, reaches_last_rank) {
            (Some(piece_kind), true) => Some(Piece::new(player, piece_kind)),
            (None, false) => None,
            _ => return Err(self.error(ErrorKind::NotationMalformed)),
        };

        Ok(Move {
            player,
            from,
            to,
            piece,
            piece_kind: piece_move.piece_kind,
            captured,
            en_passant,
            promotion,
            castling: None,
            check: self.check,
            notation: self.token.clone(),
        })
    }

    /// Find the single piece of `player` and the named kind, standing on a square the
    /// origin admits, whose destinations include the destination.
    /// Candidates are searched in square id order.
    fn resolve_source(
        &self,
        ctx: &MoveContext,
        player: Color,
        pins: &Pins,
        piece_move: &PieceMove,
    ) -> error::Result<(PieceId, Square)> {
        let board = ctx.board;
        let wanted = Piece::new(player, piece_move.piece_kind);
        let can_move = |id: PieceId| {
            board.piece(id) == wanted
                && movegen::destinations(ctx, id, pins).contains(&piece_move.destination)
        };

        let mut candidates = board
            .mailbox()
            .iter()
            .filter(|&(square, _)| piece_move.origin.admits(square))
            .filter_map(|(square, occupant)| occupant.map(|id| (id, square)))
            .filter(|&(id, _)| can_move(id));

        let source = candidates
            .next()
            .ok_or_else(|| self.error(ErrorKind::NotationUnresolved))?;
        match candidates.next() {
            Some(_) => Err(self.error(ErrorKind::NotationAmbiguous)),
            None => Ok(source),
        }
    }
}

/// Notation ::= Castle | [Piece][File|Rank|Square][x]Square[=Promotion]
/// followed by an optional `+` or `#`.
/// Castle tokens accept `O` or `0` in either case.
impl FromStr for Notation {
    type Err = error::Error;
    fn from_str(token: &str) -> error::Result<Self> {
        let malformed = || error::Error::from((ErrorKind::NotationMalformed, token));
        if token.is_empty() || !token.is_ascii() {
            return Err(malformed());
        }

        let (body, check) = match token.as_bytes()[token.len() - 1] {
            b'+' => (&token[..token.len() - 1], Some(CheckMarker::Check)),
            b'#' => (&token[..token.len() - 1], Some(CheckMarker::Mate)),
            _ => (token, None),
        };

        if body.contains('-') {
            let side = match body.replace('0', "O").to_ascii_uppercase().as_str() {
                "O-O" => CastlingSide::King,
                "O-O-O" => CastlingSide::Queen,
                _ => return Err(malformed()),
            };
            return Ok(Self {
                token: token.to_string(),
                check,
                shape: Shape::Castle(side),
            });
        }

        let bytes = body.as_bytes();
        let (body, promotion) = match bytes.len() >= 2 && bytes[bytes.len() - 2] == b'=' {
            true => {
                let letter = (bytes[bytes.len() - 1] as char).to_ascii_uppercase();
                let piece_kind = PieceKind::from_notation_char(letter)
                    .filter(PieceKind::is_promotable)
                    .ok_or_else(malformed)?;
                (&body[..body.len() - 2], Some(piece_kind))
            }
            false => (body, None),
        };

        if body.len() < 2 {
            return Err(malformed());
        }
        let destination = Square::from_str(&body[body.len() - 2..]).map_err(|_| malformed())?;
        let mut rest = &body[..body.len() - 2];

        let capture = rest.ends_with('x');
        if capture {
            rest = &rest[..rest.len() - 1];
        }

        let piece_kind = match rest.chars().next().and_then(PieceKind::from_notation_char) {
            Some(piece_kind) => {
                rest = &rest[1..];
                piece_kind
            }
            None => PieceKind::Pawn,
        };
        if promotion.is_some() && piece_kind != PieceKind::Pawn {
            return Err(malformed());
        }

        let origin = match rest.len() {
            0 => Origin::Any,
            1 => {
                let ch = rest.as_bytes()[0] as char;
                match (File::try_from(ch), Rank::try_from(ch)) {
                    (Ok(file), _) => Origin::File(file),
                    (_, Ok(rank)) => Origin::Rank(rank),
                    _ => return Err(malformed()),
                }
            }
            2 => Origin::Square(Square::from_str(rest).map_err(|_| malformed())?),
            _ => return Err(malformed()),
        };

        Ok(Self {
            token: token.to_string(),
            check,
            shape: Shape::Piece(PieceMove {
                piece_kind,
                origin,
                capture,
                destination,
                promotion,
            }),
        })
    }
}
