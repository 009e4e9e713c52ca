//! The fundamental and simple types of `scoresheet_core`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::mem::replace;
use std::ops::{BitOr, Not};
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // A, B, C, D, E, F, G, H
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// A queen in the middle of an empty board reaches 27 squares, more than any other piece.
pub const MAX_DESTINATIONS: usize = 27;

// Each king can have at most one pinned piece per ray, 8 rays per king.
pub const MAX_PINS: usize = 16;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Counter for half-move clock and full-moves.
pub type MoveCount = u32;

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// Enum variant order and discriminant are important.
/// Must be contiguous and start from 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Observe Castling rights for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Castling(u8);

/// Castling Enum constants.
impl Castling {
    pub const W_KING: Castling = Castling(0b00000001);
    pub const W_QUEEN: Castling = Castling(0b00000010);
    pub const B_KING: Castling = Castling(0b00000100);
    pub const B_QUEEN: Castling = Castling(0b00001000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0u8);
}

/// The wing of the board a castling move goes to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CastlingSide {
    King,
    Queen,
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order ABCDEFGH.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum File {
    A, B, C, D, E, F, G, H = 7u8,
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order 12345678.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8 = 7u8,
}

/// Square
/// Every possible square on a chess board.
/// Discriminants are the square id: row-major with rank 8 as row 0,
/// `id = 8 * (8 - rank) + file`, so A8 = 0, H8 = 7, A1 = 56 and H1 = 63.
/// WARNING: The exact ordering of enums is important for their discriminants.
///          Changing the discriminant of any variant is breaking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1 = 63u8,
}

/// Handle to a piece in a position's piece arena.
/// Ids are never reused, captured pieces keep theirs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PieceId(pub(crate) usize);

/// Trailing `+` or `#` of a notation token.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CheckMarker {
    Check,
    Mate,
}

/// The rook half of a castling move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CastlingMove {
    pub(crate) side: CastlingSide,
    pub(crate) rook: PieceId,
    pub(crate) rook_from: Square,
    pub(crate) rook_to: Square,
}

/// Move
/// A fully resolved ply, produced by the notation parser from a token and
/// consumed once when applied to the position it was resolved against.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Move {
    /// Player who made the move.
    pub(crate) player: Color,
    /// Original square of moving piece.
    pub(crate) from: Square,
    /// Target square of moving piece.
    pub(crate) to: Square,
    /// Piece that moved.
    pub(crate) piece: PieceId,
    /// Kind of the piece that moved.
    pub(crate) piece_kind: PieceKind,
    /// Piece removed by this move and the square it was removed from.
    /// The square differs from `to` only for en passant.
    pub(crate) captured: Option<(PieceId, Square)>,
    pub(crate) en_passant: bool,
    /// Piece placed on `to` instead of the moving pawn.
    pub(crate) promotion: Option<Piece>,
    pub(crate) castling: Option<CastlingMove>,
    pub(crate) check: Option<CheckMarker>,
    /// Token the move was resolved from, including any check marker.
    pub(crate) notation: String,
}

//////////////////////
/// Implementations //
//////////////////////

impl Color {
    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Row delta of a forward pawn step. Row 0 is rank 8.
    pub const fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank the pieces of this color start on.
    pub const fn back_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// Rank the pawns of this color start on.
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    pub const fn iter() -> ColorIterator {
        ColorIterator::new()
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Not for &Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        Color::not(*self)
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.to_char()
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

pub struct ColorIterator {
    maybe_color: Option<Color>,
}

impl ColorIterator {
    pub const fn new() -> Self {
        Self {
            maybe_color: Some(Color::White),
        }
    }
}

impl Iterator for ColorIterator {
    type Item = Color;
    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.maybe_color {
            Some(Color::White) => Some(Color::Black),
            Some(Color::Black) | None => None,
        };
        replace(&mut self.maybe_color, value)
    }
}

impl PieceKind {
    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Piece letter as used in move notation, where a pawn has no letter.
    /// Only uppercase letters name a piece in notation.
    pub const fn from_notation_char(ch: char) -> Option<Self> {
        match ch {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Returns true if PieceKind can slide, false otherwise.
    /// Sliding piece_kinds are Rooks, Bishops, and Queens.
    pub const fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    /// Returns true if a pawn may promote to this kind.
    pub const fn is_promotable(&self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> &Color {
        &self.color
    }
    pub const fn piece_kind(&self) -> &PieceKind {
        &self.piece_kind
    }

    /// Symbol casing encodes side, uppercase is white.
    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = match value.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'R' => PieceKind::Rook,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => {
                return Err((
                    ErrorKind::ParsePieceMalformed,
                    "char is not in PRNBQKprnbqk",
                )
                    .into())
            }
        };
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Castling {
    /// Make new Castling with all rights of initial chess position.
    pub const fn start_position() -> Self {
        Self::ALL
    }

    /// The single right for one color and one side.
    pub const fn right(color: Color, side: CastlingSide) -> Self {
        match (color, side) {
            (Color::White, CastlingSide::King) => Self::W_KING,
            (Color::White, CastlingSide::Queen) => Self::W_QUEEN,
            (Color::Black, CastlingSide::King) => Self::B_KING,
            (Color::Black, CastlingSide::Queen) => Self::B_QUEEN,
        }
    }

    /// Returns underlying bits used to represent Castling rights.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns true if there are no castling rights.
    pub const fn is_none(&self) -> bool {
        self.0 == 0u8
    }

    /// Returns true if Castling mask has all of provided bits.
    pub fn has(&self, rights: Castling) -> bool {
        debug_assert!(rights.is_mask_valid());
        self.0 & rights.0 == rights.0
    }

    /// Set given bits to '1' on Castling mask.
    pub fn set(&mut self, rights: Castling) {
        debug_assert!(rights.is_mask_valid());
        self.0 |= rights.0;
    }

    /// Set given bits to '0' on Castling mask.
    pub fn clear(&mut self, rights: Castling) {
        debug_assert!(rights.is_mask_valid());
        self.0 &= !rights.0;
    }

    /// Removes all castling rights for a color.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => self.clear(Self::W_SIDE),
            Color::Black => self.clear(Self::B_SIDE),
        }
    }

    /// Returns true if all bits set in Castling are valid, and false otherwise.
    pub const fn is_mask_valid(&self) -> bool {
        self.0 <= Self::ALL.0
    }
}

/// Defaults to Castling rights for starting chess position, ALL.
impl Default for Castling {
    fn default() -> Self {
        Self::start_position()
    }
}

impl BitOr for Castling {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Displays in FEN-component format, flags in fixed order KQkq.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut castling_str = String::with_capacity(4);

        if self.is_none() {
            castling_str.push('-');
        } else {
            if self.has(Self::W_KING) {
                castling_str.push('K');
            }
            if self.has(Self::W_QUEEN) {
                castling_str.push('Q');
            }
            if self.has(Self::B_KING) {
                castling_str.push('k');
            }
            if self.has(Self::B_QUEEN) {
                castling_str.push('q');
            }
        }
        f.write_str(&castling_str)
    }
}

/// Castling ::= '-' | [KQkq]{1,4}
impl FromStr for Castling {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if s == "-" {
            return Ok(Castling::NONE);
        }
        let num_chars = s.chars().count();
        if num_chars == 0 || num_chars > 4 {
            return Err((ErrorKind::ParseCastlingMalformed, "expected 1 to 4 of KQkq").into());
        }

        let mut castling_rights = Castling::NONE;
        for ch in s.chars() {
            match ch {
                'K' => castling_rights.set(Self::W_KING),
                'Q' => castling_rights.set(Self::W_QUEEN),
                'k' => castling_rights.set(Self::B_KING),
                'q' => castling_rights.set(Self::B_QUEEN),
                _ => return Err((ErrorKind::ParseCastlingMalformed, "char not of -KQkq").into()),
            };
        }
        Ok(castling_rights)
    }
}

impl CastlingSide {
    /// File the king lands on.
    pub const fn king_file(&self) -> File {
        match self {
            CastlingSide::King => File::G,
            CastlingSide::Queen => File::C,
        }
    }

    /// File the rook lands on.
    pub const fn rook_file(&self) -> File {
        match self {
            CastlingSide::King => File::F,
            CastlingSide::Queen => File::D,
        }
    }

    /// Column delta pointing from the king toward this side's rook.
    pub const fn direction(&self) -> i8 {
        match self {
            CastlingSide::King => 1,
            CastlingSide::Queen => -1,
        }
    }
}

impl File {
    /// File enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        use File::*;
        match value {
            0 => Some(A),
            1 => Some(B),
            2 => Some(C),
            3 => Some(D),
            4 => Some(E),
            5 => Some(F),
            6 => Some(G),
            7 => Some(H),
            _ => None,
        }
    }
    /// Get the character representation of File, in lowercase.
    pub const fn to_char(&self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
            Self::E => 'e',
            Self::F => 'f',
            Self::G => 'g',
            Self::H => 'h',
        }
    }
}

impl Rank {
    /// Rank enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        use Rank::*;
        match value {
            0 => Some(R1),
            1 => Some(R2),
            2 => Some(R3),
            3 => Some(R4),
            4 => Some(R5),
            5 => Some(R6),
            6 => Some(R7),
            7 => Some(R8),
            _ => None,
        }
    }
    pub const fn to_char(&self) -> char {
        match self {
            Self::R1 => '1',
            Self::R2 => '2',
            Self::R3 => '3',
            Self::R4 => '4',
            Self::R5 => '5',
            Self::R6 => '6',
            Self::R7 => '7',
            Self::R8 => '8',
        }
    }
    /// Board row of this rank, where rank 8 is row 0.
    pub const fn row(&self) -> u8 {
        7 - *self as u8
    }
}

impl TryFrom<char> for File {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'a' => Ok(Self::A),
            'b' => Ok(Self::B),
            'c' => Ok(Self::C),
            'd' => Ok(Self::D),
            'e' => Ok(Self::E),
            'f' => Ok(Self::F),
            'g' => Ok(Self::G),
            'h' => Ok(Self::H),
            _ => Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '1' => Ok(Self::R1),
            '2' => Ok(Self::R2),
            '3' => Ok(Self::R3),
            '4' => Ok(Self::R4),
            '5' => Ok(Self::R5),
            '6' => Ok(Self::R6),
            '7' => Ok(Self::R7),
            '8' => Ok(Self::R8),
            _ => Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into()),
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

pub struct SquareIterator {
    square_discriminant: u8,
}

impl Square {
    /// All squares in id order.
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = {
        use Square::*;
        [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ]
    };

    /// Square enum variants cover all u8 values from 0-63 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < NUM_SQUARES {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Square at a (row, column) pair, or None if either is outside 0..8.
    /// Off-board lookups are routine while walking rays.
    pub const fn from_coords(row: i8, column: i8) -> Option<Self> {
        if 0 <= row && row < NUM_RANKS as i8 && 0 <= column && column < NUM_FILES as i8 {
            Self::from_u8((row * NUM_FILES as i8 + column) as u8)
        } else {
            None
        }
    }

    pub const fn iter() -> SquareIterator {
        SquareIterator::new()
    }

    /// Stable id, row-major with rank 8 as row 0.
    pub const fn id(&self) -> usize {
        *self as usize
    }

    /// Returns 0-based row, where row 0 is rank 8.
    pub const fn row(&self) -> i8 {
        (*self as u8 / NUM_FILES as u8) as i8
    }

    /// Returns 0-based column, where column 0 is file a.
    pub const fn column(&self) -> i8 {
        (*self as u8 % NUM_FILES as u8) as i8
    }

    pub fn file(&self) -> File {
        match File::from_u8(self.column() as u8) {
            Some(file) => file,
            None => unreachable!("column is always within 0..8"),
        }
    }

    pub fn rank(&self) -> Rank {
        match Rank::from_u8(7 - self.row() as u8) {
            Some(rank) => rank,
            None => unreachable!("row is always within 0..8"),
        }
    }

    /// 2-character key, `<file><rank>`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Square reached by stepping (rows, columns) away from self, if on board.
    pub const fn offset(&self, rows: i8, columns: i8) -> Option<Self> {
        Self::from_coords(self.row() + rows, self.column() + columns)
    }
}

impl SquareIterator {
    const fn new() -> Self {
        Self {
            square_discriminant: Square::A8 as u8,
        }
    }
}

impl Iterator for SquareIterator {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let maybe_item = Square::from_u8(self.square_discriminant);
        if self.square_discriminant <= Square::H1 as u8 {
            self.square_discriminant += 1;
        }
        maybe_item
    }
}

impl From<(File, Rank)> for Square {
    fn from((file, rank): (File, Rank)) -> Self {
        Self::ALL[rank.row() as usize * NUM_FILES + file as usize]
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err((ErrorKind::ParseSquareMalformed, s).into()),
        };
        let file = File::try_from(file_ch)
            .map_err(|_| error::Error::from((ErrorKind::ParseSquareMalformed, s)))?;
        let rank = Rank::try_from(rank_ch)
            .map_err(|_| error::Error::from((ErrorKind::ParseSquareMalformed, s)))?;
        Ok(Square::from((file, rank)))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl PieceId {
    /// Position of this id in the arena.
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl CheckMarker {
    pub const fn to_char(&self) -> char {
        match self {
            CheckMarker::Check => '+',
            CheckMarker::Mate => '#',
        }
    }
}

impl CastlingMove {
    // Immutable Getters
    pub const fn side(&self) -> &CastlingSide {
        &self.side
    }
    pub const fn rook(&self) -> &PieceId {
        &self.rook
    }
    pub const fn rook_from(&self) -> &Square {
        &self.rook_from
    }
    pub const fn rook_to(&self) -> &Square {
        &self.rook_to
    }
}

impl Move {
    // Immutable Getters
    pub const fn player(&self) -> &Color {
        &self.player
    }
    pub const fn from(&self) -> &Square {
        &self.from
    }
    pub const fn to(&self) -> &Square {
        &self.to
    }
    pub const fn piece(&self) -> &PieceId {
        &self.piece
    }
    pub const fn piece_kind(&self) -> &PieceKind {
        &self.piece_kind
    }
    pub const fn captured(&self) -> &Option<(PieceId, Square)> {
        &self.captured
    }
    pub const fn promotion(&self) -> &Option<Piece> {
        &self.promotion
    }
    pub const fn castling(&self) -> &Option<CastlingMove> {
        &self.castling
    }
    pub const fn check(&self) -> &Option<CheckMarker> {
        &self.check
    }
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Returns true if this move removed an opposing piece.
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    pub const fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// Returns true if this move was made by a pawn.
    pub fn is_pawn_move(&self) -> bool {
        self.piece_kind == PieceKind::Pawn
    }

    /// Returns true if the halfmove clock resets after this move.
    pub fn is_unrepeatable(&self) -> bool {
        self.is_capture() || self.is_pawn_move()
    }
}

/// Coordinate form of a move, `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            f.write_char(piece.piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn castling_logical_ops() {
        let mut cr = Castling::default();
        assert!(cr.has(Castling::ALL));
        assert!(cr.has(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));

        cr.clear(Castling::W_KING);
        assert!(!cr.has(Castling::ALL));
        assert!(!cr.has(Castling::W_KING));
        assert!(cr.has(Castling::W_QUEEN));
        assert!(!cr.has(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));

        cr.clear_color(Color::Black);
        assert!(!cr.has(Castling::B_KING));
        assert!(!cr.has(Castling::B_QUEEN));
        assert!(cr.has(Castling::W_QUEEN));
        assert!(!cr.is_none());

        cr.clear(Castling::right(Color::White, CastlingSide::Queen));
        assert!(cr.is_none());
    }

    #[test]
    fn castling_to_from_string() {
        assert_eq!(Castling::from_str("-").unwrap(), Castling::NONE);
        assert_eq!(Castling::from_str("K").unwrap(), Castling::W_KING);
        assert_eq!(
            Castling::from_str("Kk").unwrap(),
            Castling::W_KING | Castling::B_KING
        );
        assert_eq!(Castling::from_str("KQkq").unwrap(), Castling::ALL);
        assert_eq!(
            Castling::from_str("Qq").unwrap(),
            Castling::W_QUEEN | Castling::B_QUEEN
        );
        assert!(Castling::from_str("").is_err());
        assert!(Castling::from_str("x").is_err());
        assert!(Castling::from_str("KQkqK").is_err());
        assert!(Castling::from_str("K-").is_err());

        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!((Castling::B_QUEEN | Castling::W_KING).to_string(), "Kq");
        assert_eq!(Castling::NONE.to_string(), "-");
    }

    #[test]
    fn square_ids_are_row_major_from_rank_8() {
        assert_eq!(A8.id(), 0);
        assert_eq!(H8.id(), 7);
        assert_eq!(A1.id(), 56);
        assert_eq!(H1.id(), 63);
        assert_eq!(E4.id(), 8 * (8 - 4) + 4);

        assert_eq!(E4.row(), 4);
        assert_eq!(E4.column(), 4);
        assert_eq!(E4.file(), File::E);
        assert_eq!(E4.rank(), Rank::R4);
    }

    #[test]
    fn square_to_from_string() {
        let a1 = Square::from_str("a1").unwrap();
        let b7 = Square::from_str("b7").unwrap();
        let h8: Square = "h8".parse().unwrap();
        assert_eq!(a1, A1);
        assert_eq!(b7, B7);
        assert_eq!(h8, H8);

        for invalid in ["A1", "X3", "a$", "g", "a9", "i1", "e44", ""] {
            let err = Square::from_str(invalid).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ParseSquareMalformed);
        }

        assert_eq!(a1.to_string(), "a1");
        assert_eq!(b7.key(), "b7");
    }

    #[test]
    fn square_lookups_round_trip() {
        let mut count = 0;
        for square in Square::iter() {
            assert_eq!(Square::from_str(&square.key()).unwrap(), square);
            assert_eq!(Square::from_coords(square.row(), square.column()), Some(square));
            assert_eq!(Square::from((square.file(), square.rank())), square);
            assert_eq!(Square::from_u8(square.id() as u8), Some(square));
            count += 1;
        }
        assert_eq!(count, NUM_SQUARES);
    }

    #[test]
    fn off_board_coords_are_none() {
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, -1), None);
        assert_eq!(Square::from_coords(8, 3), None);
        assert_eq!(Square::from_coords(3, 8), None);
        assert_eq!(H1.offset(1, 0), None);
        assert_eq!(A8.offset(-1, 0), None);
        assert_eq!(E2.offset(-2, 0), Some(E4));
        assert_eq!(Square::from_u8(64), None);
    }

    #[test]
    fn piece_symbols() {
        let white_knight = Piece::try_from('N').unwrap();
        let black_queen = Piece::try_from('q').unwrap();
        assert_eq!(white_knight, Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(black_queen, Piece::new(Color::Black, PieceKind::Queen));
        assert_eq!(white_knight.to_char(), 'N');
        assert_eq!(black_queen.to_string(), "q");

        let err = Piece::try_from('x').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsePieceMalformed);
    }

    #[test]
    fn notation_piece_letters_are_uppercase_only() {
        assert_eq!(PieceKind::from_notation_char('N'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_notation_char('K'), Some(PieceKind::King));
        assert_eq!(PieceKind::from_notation_char('b'), None);
        assert_eq!(PieceKind::from_notation_char('P'), None);
    }

    #[test]
    fn file_and_rank_are_contiguous() {
        use File::*;
        use Rank::*;
        assert_eq!(A as u8, 0);
        assert_eq!(H as u8, 7);
        assert_eq!(R1 as u8, 0);
        assert_eq!(R8 as u8, 7);
        assert_eq!(R8.row(), 0);
        assert_eq!(R1.row(), 7);
    }
}
