//! Forsyth-Edwards Notation, the 6-field position string.
//!
//! `<placement> <side to move> <castling> <en passant> <halfmove clock> <fullmove number>`

use std::error;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::boardrepr::Board;
use crate::coretypes::{Castling, Color, MoveCount, Piece, Square, NUM_FILES, NUM_RANKS};
use crate::position::Position;

/// Standard chess start position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The field of a position string that failed to decode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParseFenError {
    /// Not exactly 6 space separated fields.
    IllFormed,
    Placement,
    SideToMove,
    Castling,
    EnPassant,
    HalfMoveClock,
    FullMoveNumber,
}

impl ParseFenError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFenError::IllFormed => "ill-formed fen string",
            ParseFenError::Placement => "invalid piece placement",
            ParseFenError::SideToMove => "invalid side to move",
            ParseFenError::Castling => "invalid castling rights",
            ParseFenError::EnPassant => "invalid en passant square",
            ParseFenError::HalfMoveClock => "invalid halfmove clock",
            ParseFenError::FullMoveNumber => "invalid fullmove number",
        }
    }
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl error::Error for ParseFenError {}

/// Conversion to and from a FEN string.
pub trait Fen: Sized {
    /// Decode a complete FEN string into a fresh value.
    fn parse_fen(s: &str) -> Result<Self, ParseFenError>;

    /// Encode as a complete FEN string.
    fn to_fen(&self) -> String;
}

impl Fen for Position {
    fn parse_fen(s: &str) -> Result<Self, ParseFenError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(ParseFenError::IllFormed);
        }

        let board = parse_placement(fields[0])?;
        let player = parse_side_to_move(fields[1])?;
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmoves = parse_halfmove_clock(fields[4])?;
        let fullmoves = parse_fullmove_number(fields[5])?;

        Ok(Position::from_parts(
            board, player, castling, en_passant, halfmoves, fullmoves,
        ))
    }

    fn to_fen(&self) -> String {
        let en_passant = match self.en_passant() {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            self.placement(),
            self.player(),
            self.castling(),
            en_passant,
            self.halfmoves(),
            self.fullmoves()
        )
    }
}

/// Placement ::= 8 ranks separated by `/`, rank 8 first.
/// Each rank is piece letters and digits 1-8 that total exactly 8 columns.
/// Pieces are created in reading order.
pub fn parse_placement(s: &str) -> Result<Board, ParseFenError> {
    let ranks: Vec<&str> = s.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(ParseFenError::Placement);
    }

    let mut board = Board::new();
    for (row, rank) in ranks.into_iter().enumerate() {
        let mut column: usize = 0;
        for ch in rank.chars() {
            match ch.to_digit(10) {
                Some(empty @ 1..=8) => column += empty as usize,
                Some(_) => return Err(ParseFenError::Placement),
                None => {
                    let piece = Piece::try_from(ch).map_err(|_| ParseFenError::Placement)?;
                    let square = Square::from_coords(row as i8, column as i8)
                        .ok_or(ParseFenError::Placement)?;
                    board.place(piece, square);
                    column += 1;
                }
            }
            if column > NUM_FILES {
                return Err(ParseFenError::Placement);
            }
        }
        if column != NUM_FILES {
            return Err(ParseFenError::Placement);
        }
    }

    Ok(board)
}

/// Side to move ::= `w` | `b`
pub fn parse_side_to_move(s: &str) -> Result<Color, ParseFenError> {
    match s {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ParseFenError::SideToMove),
    }
}

/// Castling ::= `-` | 1 to 4 of `KQkq`
pub fn parse_castling(s: &str) -> Result<Castling, ParseFenError> {
    Castling::from_str(s).map_err(|_| ParseFenError::Castling)
}

/// En passant ::= `-` | Square
pub fn parse_en_passant(s: &str) -> Result<Option<Square>, ParseFenError> {
    match s {
        "-" => Ok(None),
        _ => Square::from_str(s)
            .map(Some)
            .map_err(|_| ParseFenError::EnPassant),
    }
}

pub fn parse_halfmove_clock(s: &str) -> Result<MoveCount, ParseFenError> {
    parse_move_count(s).ok_or(ParseFenError::HalfMoveClock)
}

pub fn parse_fullmove_number(s: &str) -> Result<MoveCount, ParseFenError> {
    parse_move_count(s).ok_or(ParseFenError::FullMoveNumber)
}

/// Digits only, so signs are rejected.
fn parse_move_count(s: &str) -> Option<MoveCount> {
    match !s.is_empty() && s.bytes().all(|byte| byte.is_ascii_digit()) {
        true => s.parse().ok(),
        false => None,
    }
}

/// Encode the placement field.
/// Squares are visited in id order, and each run of empty squares within a
/// rank collapses into its length.
pub fn placement(board: &Board) -> String {
    let mut placement = String::with_capacity(72);

    for (index, (square, _)) in board.mailbox().iter().enumerate() {
        if index > 0 && square.column() == 0 {
            placement.push('/');
        }
        if let Some(piece) = board.piece_at(square) {
            placement.push(char::from(piece));
        } else {
            match placement.pop() {
                Some(ch @ '1'..='7') => placement.push(char::from(ch as u8 + 1)),
                Some(ch) => {
                    placement.push(ch);
                    placement.push('1');
                }
                None => placement.push('1'),
            }
        }
    }

    placement
}
