//! Holds Position struct, the most important data structure for Scoresheet.
//! Position represents a chess position and owns all of its mutation.

use std::cell::OnceCell;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::boardrepr::Board;
use crate::coretypes::{
    Castling, CastlingSide, Color, File, Move, MoveCount, Piece, PieceKind, Square,
};
use crate::error::{self, ErrorKind};
use crate::fen::{self, Fen, ParseFenError};
use crate::movegen::{self as mg, MoveContext, Pins};
use crate::movelist::{MoveHistory, SquareList};
use crate::notation::Notation;

/// struct Position
/// A complete data set that can represent any chess position, and the moves
/// that led to it.
/// # Members:
/// * board - square slots and the arena of every piece ever placed, mutually bound.
/// * player - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Square passed over by the last double pawn push, if any.
/// * halfmoves - Plies since the last capture or pawn move.
/// * fullmoves - Starts at 1, increments after each black player's move.
/// * history - Every move applied, in order.
/// * placement - FEN placement field, computed on demand and cleared by every move.
#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) player: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
    pub(crate) history: MoveHistory,
    placement: OnceCell<String>,
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        Self::from_parts(
            start_board(&back_rank),
            Color::White,
            Castling::start_position(),
            None,
            0,
            1,
        )
    }

    /// Start position with custom back ranks, given as 8 piece letters from file a to h.
    /// Black mirrors white. Castling rights are all set.
    pub fn from_back_rank(pieces: &str) -> error::Result<Self> {
        let back_rank = pieces
            .chars()
            .map(|ch| Piece::try_from(ch.to_ascii_uppercase()).map(|piece| piece.piece_kind))
            .collect::<error::Result<Vec<PieceKind>>>()
            .map_err(|_| ParseFenError::Placement)?;
        if back_rank.len() != 8 {
            return Err(ParseFenError::Placement.into());
        }

        Ok(Self::from_parts(
            start_board(&back_rank),
            Color::White,
            Castling::start_position(),
            None,
            0,
            1,
        ))
    }

    /// A position with no history.
    pub(crate) fn from_parts(
        board: Board,
        player: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmoves: MoveCount,
        fullmoves: MoveCount,
    ) -> Self {
        Self {
            board,
            player,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
            history: MoveHistory::new(),
            placement: OnceCell::new(),
        }
    }

    /// Const getters.
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn player(&self) -> &Color {
        &self.player
    }
    pub fn castling(&self) -> &Castling {
        &self.castling
    }
    pub fn en_passant(&self) -> &Option<Square> {
        &self.en_passant
    }
    pub fn halfmoves(&self) -> &MoveCount {
        &self.halfmoves
    }
    pub fn fullmoves(&self) -> &MoveCount {
        &self.fullmoves
    }
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// All 64 squares in id order, with their occupant.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::iter().map(move |square| (square, self.board.piece_at(square)))
    }

    /// FEN placement field, cached until the next move.
    pub fn placement(&self) -> &str {
        self.placement.get_or_init(|| fen::placement(&self.board))
    }

    pub fn context(&self) -> MoveContext<'_> {
        MoveContext::new(&self.board, self.en_passant, self.castling)
    }

    /// Pins against both kings, for the current board.
    pub fn pins(&self) -> Pins {
        Pins::for_both_kings(&self.board)
    }

    /// Pseudo-legal destinations of the piece on square, pins applied.
    /// An empty square has none.
    pub fn destinations(&self, square: Square) -> SquareList {
        match self.board.occupant(square) {
            Some(id) => mg::destinations(&self.context(), id, &self.pins()),
            None => SquareList::new(),
        }
    }

    /// Squares of every piece, of either color, whose destinations include square.
    pub fn threats(&self, square: Square) -> Vec<Square> {
        let ctx = self.context();
        let pins = self.pins();
        self.board
            .mailbox()
            .iter()
            .filter_map(|(from, occupant)| occupant.map(|id| (from, id)))
            .filter(|&(_, id)| mg::destinations(&ctx, id, &pins).contains(&square))
            .map(|(from, _)| from)
            .collect()
    }

    /// Resolve a notation token into a move for the player to move, without applying it.
    pub fn parse_move(&self, token: &str) -> error::Result<Move> {
        let notation = Notation::from_str(token)?;
        notation.resolve(&self.context(), self.player, &self.pins())
    }

    /// Apply a notation token to self, in place, and return the resolved move.
    /// On error nothing is changed.
    pub fn do_move(&mut self, token: &str) -> error::Result<Move> {
        let move_ = self.parse_move(token)?;
        let counters = self.move_counters(&move_)?;
        self.apply(move_.clone(), counters);
        Ok(move_)
    }

    /// Generates a new Position from applying a notation token on current Position.
    pub fn make_move(&self, token: &str) -> error::Result<Self> {
        let mut position = self.clone();
        position.do_move(token)?;
        Ok(position)
    }

    /// Mutate self by a move resolved against self.
    fn apply(&mut self, move_: Move, (halfmoves, fullmoves): (MoveCount, MoveCount)) {
        self.update_castling(&move_);

        if let Some((captured, _)) = move_.captured {
            self.board.unbind_piece(captured);
        }

        // A promoted pawn leaves the board and a fresh piece takes its place.
        let arriving = match move_.promotion {
            Some(piece) => {
                self.board.unbind_piece(move_.piece);
                self.board.add_piece(piece)
            }
            None => move_.piece,
        };
        self.board.bind(arriving, move_.to);

        if let Some(castling) = move_.castling {
            self.board.bind(castling.rook, castling.rook_to);
        }

        self.halfmoves = halfmoves;
        self.fullmoves = fullmoves;
        self.update_en_passant(&move_);

        self.player = !self.player;
        self.placement = OnceCell::new();
        self.history.push(move_);
    }

    /// halfmoves is set to zero after a capture or pawn move, incremented otherwise.
    /// fullmoves is incremented after each Black player's move.
    /// A counter that would overflow rejects the move.
    fn move_counters(&self, move_: &Move) -> error::Result<(MoveCount, MoveCount)> {
        let overflow = || error::Error::from((ErrorKind::MoveCounterOverflow, &move_.notation));

        let halfmoves = match move_.is_unrepeatable() {
            true => 0,
            false => self.halfmoves.checked_add(1).ok_or_else(overflow)?,
        };
        let fullmoves = match move_.player {
            Color::Black => self.fullmoves.checked_add(1).ok_or_else(overflow)?,
            Color::White => self.fullmoves,
        };
        Ok((halfmoves, fullmoves))
    }

    /// En Passant square is set to the passed over square after a double pawn push.
    /// Any other move clears it.
    fn update_en_passant(&mut self, move_: &Move) {
        self.en_passant = None;
        if move_.is_pawn_move() && (move_.to.row() - move_.from.row()).abs() == 2 {
            let passed_row = (move_.to.row() + move_.from.row()) / 2;
            self.en_passant = Square::from_coords(passed_row, move_.from.column());
        }
    }

    /// Must run before the board changes.
    /// A king move clears both of its side's rights.
    /// A rook leaving its back rank clears the right of the side of the king it stood on.
    /// Capturing a rook on its corner square clears the opponent's right for that corner.
    fn update_castling(&mut self, move_: &Move) {
        let player = move_.player;

        match move_.piece_kind {
            PieceKind::King => self.castling.clear_color(player),
            PieceKind::Rook if move_.from.rank() == player.back_rank() => {
                let king_column = self
                    .board
                    .arena()
                    .find(player, PieceKind::King)
                    .map_or(File::E as i8, |(_, king_square)| king_square.column());
                let side = match move_.from.column() > king_column {
                    true => CastlingSide::King,
                    false => CastlingSide::Queen,
                };
                self.castling.clear(Castling::right(player, side));
            }
            _ => (),
        }

        if let Some((captured, square)) = move_.captured {
            let opponent = !player;
            if self.board.piece(captured) == Piece::new(opponent, PieceKind::Rook)
                && square.rank() == opponent.back_rank()
            {
                match square.file() {
                    File::A => self.castling.clear(Castling::right(opponent, CastlingSide::Queen)),
                    File::H => self.castling.clear(Castling::right(opponent, CastlingSide::King)),
                    _ => (),
                }
            }
        }
    }
}

/// Both back ranks mirror `back_rank`, pawns fill ranks 2 and 7.
/// Pieces are created in reading order, rank 8 first.
fn start_board(back_rank: &[PieceKind]) -> Board {
    let mut board = Board::new();
    for square in Square::iter() {
        let column = square.column() as usize;
        let piece = match square.rank() {
            rank if rank == Color::Black.back_rank() => Piece::new(Color::Black, back_rank[column]),
            rank if rank == Color::Black.pawn_rank() => Piece::new(Color::Black, PieceKind::Pawn),
            rank if rank == Color::White.pawn_rank() => Piece::new(Color::White, PieceKind::Pawn),
            rank if rank == Color::White.back_rank() => Piece::new(Color::White, back_rank[column]),
            _ => continue,
        };
        board.place(piece, square);
    }
    board
}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// The cached placement does not take part in comparison.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.player == other.player
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmoves == other.halfmoves
            && self.fullmoves == other.fullmoves
            && self.history == other.history
    }
}

impl Eq for Position {}

impl FromStr for Position {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        Ok(Self::parse_fen(s)?)
    }
}

/// Displays pretty-printed chess board and Fen string representing Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n Fen: {}\n", self.board, self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movelist;
    use Square::*;

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    #[test]
    fn pretty_print_position() {
        let start_pos = Position::start_position();
        let displayed = start_pos.to_string();
        println!("{}", start_pos);
        assert!(displayed.contains(fen::START_FEN));
        assert!(displayed.contains("| r | n | b | q | k | b | n | r | 8"));
    }

    #[test]
    fn pawn_double_push_sets_en_passant() {
        let mut position = Position::start_position();
        let move_ = position.do_move("e4").unwrap();
        assert_eq!(move_.from, E2);
        assert_eq!(move_.to, E4);
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        position.do_move("Nf6").unwrap();
        assert_eq!(*position.en_passant(), None);
        assert_eq!(*position.fullmoves(), 2);
        assert_eq!(*position.halfmoves(), 1);
    }

    #[test]
    fn knight_destinations_from_b1() {
        let mut position = Position::start_position();
        let knight = sorted(position.destinations(B1).to_vec());
        assert_eq!(knight, sorted(vec![A3, C3]));

        position.do_move("d4").unwrap();
        position.do_move("d5").unwrap();
        let knight = position.destinations(B1);
        assert_eq!(sorted(knight.to_vec()), sorted(vec![A3, C3, D2]));
        assert_eq!(movelist::display(&position.destinations(E4)), "");
    }

    #[test]
    fn halfmove_clock_resets_on_capture() {
        let mut position =
            Position::parse_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 5 30").unwrap();
        position.do_move("Nb5").unwrap();
        assert_eq!(*position.halfmoves(), 6);
        position.do_move("Kd7").unwrap();
        assert_eq!(*position.halfmoves(), 7);
        assert_eq!(*position.fullmoves(), 31);

        let move_ = position.do_move("Nxd4").unwrap_err();
        assert_eq!(move_.kind(), ErrorKind::NotationUnresolved);

        position.do_move("Kc3").unwrap_err();
        position.do_move("Nc3").unwrap();
        position.do_move("Kd6").unwrap();
        let capture = position.do_move("Nxd5").unwrap();
        assert!(capture.is_capture());
        assert_eq!(*position.halfmoves(), 0);
    }

    #[test]
    fn castle_king_side() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let move_ = position.do_move("O-O").unwrap();
        assert!(move_.is_castling());
        assert_eq!(move_.to, G1);
        assert_eq!(
            position.board().piece_at(G1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            position.board().piece_at(F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(position.board().piece_at(E1), None);
        assert_eq!(position.board().piece_at(H1), None);
        assert_eq!(*position.castling(), Castling::B_SIDE);
        assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

        position.do_move("0-0-0+").unwrap();
        assert_eq!(position.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
        assert!(position.board().is_consistent());
    }

    #[test]
    fn king_two_file_move_is_castling() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let move_ = position.do_move("Ke8c8").unwrap();
        assert_eq!(move_.castling().map(|castling| castling.rook_to), Some(D8));
        assert_eq!(position.placement(), "2kr3r/8/8/8/8/8/8/R3K2R");
    }

    #[test]
    fn castling_requires_right_and_clear_path() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/8/RN2K2R w Kkq - 0 1").unwrap();
        let before = position.to_fen();

        let err = position.do_move("O-O-O").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotationIllegalCastling);

        let mut blocked = Position::parse_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        let err = blocked.do_move("O-O-O").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotationIllegalCastling);

        assert_eq!(position.to_fen(), before);
    }

    #[test]
    fn castling_never_lands_on_other_pieces() {
        let mut position = Position::from_back_rank("rkbqnbnr").unwrap();
        let before = position.clone();

        let err = position.do_move("O-O-O").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotationIllegalCastling);
        assert_eq!(position, before);
        assert_eq!(position.squares().filter(|(_, piece)| piece.is_some()).count(), 32);

        let mut position = Position::parse_fen("rk6/8/8/8/8/8/8/RK6 w KQkq - 0 1").unwrap();
        position.do_move("O-O-O").unwrap();
        assert_eq!(position.to_fen(), "rk6/8/8/8/8/8/8/2KR4 b kq - 1 1");
    }

    #[test]
    fn move_counter_overflow_rejects_move() {
        let fen = "4k3/8/8/8/8/8/8/4K1N1 w - - 4294967295 1";
        let mut position = Position::parse_fen(fen).unwrap();
        let err = position.do_move("Nf3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveCounterOverflow);
        assert_eq!(position.to_fen(), fen);
        assert!(position.history().is_empty());

        let fen = "4k3/8/8/8/8/8/8/4K1N1 b - - 0 4294967295";
        let mut position = Position::parse_fen(fen).unwrap();
        let err = position.do_move("Kd7").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveCounterOverflow);
        assert_eq!(position.to_fen(), fen);

        // A pawn move resets the clock, so it still applies.
        let mut position = Position::parse_fen("4k3/4p3/8/8/8/8/8/4K3 b - - 4294967295 7").unwrap();
        position.do_move("e5").unwrap();
        assert_eq!(position.to_fen(), "4k3/8/8/4p3/8/8/8/4K3 w - e6 0 8");
    }

    #[test]
    fn extra_kings_are_not_analyzed() {
        let fen = "KKKKKKKK/NNNNNNNN/qqqqqqqq/8/8/8/8/k7 w - - 0 1";
        let mut position = Position::parse_fen(fen).unwrap();
        assert_eq!(position.pins().len(), 2);
        assert!(position.destinations(A8).is_empty());
        assert!(position.destinations(A7).is_empty());
        assert!(position.destinations(H7).contains(&G5));

        position.do_move("Nh7g5").unwrap();
        assert!(position.board().is_consistent());
    }

    #[test]
    fn rook_moves_clear_one_right() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.do_move("Rb1").unwrap();
        assert_eq!(position.castling().to_string(), "Kkq");
        position.do_move("Rh7").unwrap();
        assert_eq!(position.castling().to_string(), "Kq");
    }

    #[test]
    fn capturing_corner_rook_clears_right() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
        position.do_move("Bxa8").unwrap();
        assert_eq!(position.castling().to_string(), "KQk");
        position.do_move("Rxh1+").unwrap();
        assert_eq!(position.castling().to_string(), "Q");
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut position = Position::start_position();
        for token in ["e4", "a6", "e5", "d5"] {
            position.do_move(token).unwrap();
        }
        assert_eq!(*position.en_passant(), Some(D6));

        let move_ = position.do_move("exd6").unwrap();
        assert!(move_.is_en_passant());
        assert_eq!(move_.captured.map(|(_, square)| square), Some(D5));
        assert_eq!(position.board().piece_at(D5), None);
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn promotion_places_fresh_piece() {
        let mut position = Position::parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let pieces_before = position.board().arena().len();
        let move_ = position.do_move("axb8=Q+").unwrap();

        assert_eq!(
            *move_.promotion(),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(move_.to_string(), "a7b8q");
        assert_eq!(position.board().arena().len(), pieces_before + 1);
        assert_eq!(position.board().square_of(move_.piece), None);
        assert_eq!(position.placement(), "1Q2k3/8/8/8/8/8/8/4K3");
        assert!(position.board().is_consistent());
    }

    #[test]
    fn pinned_piece_destinations() {
        let position = Position::parse_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(position.destinations(E2).is_empty());

        let position = Position::parse_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        assert_eq!(position.destinations(E2).to_vec(), vec![E7]);

        let unpinned = Position::parse_fen("4k3/3r4/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(unpinned.destinations(E2).len(), 6);
    }

    #[test]
    fn failed_move_leaves_position_unchanged() {
        let mut position = Position::start_position();
        position.do_move("e4").unwrap();
        let before = position.clone();
        let fen = position.to_fen();

        for token in ["Qh5", "e4", "Ke7", "xx", "O-O"] {
            assert!(position.do_move(token).is_err(), "{token}");
            assert_eq!(position.to_fen(), fen);
            assert_eq!(position, before);
        }
    }

    #[test]
    fn ambiguous_token_is_an_error() {
        let mut position = Position::parse_fen("4k3/8/8/8/8/8/8/N1N1K3 w - - 0 1").unwrap();
        let err = position.do_move("Nb3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotationAmbiguous);
        position.do_move("Ncb3").unwrap();
        assert_eq!(position.placement(), "4k3/8/8/8/8/1N6/8/N3K3");
    }

    #[test]
    fn threats_to_square() {
        let position = Position::start_position();
        // Pawns only threaten a diagonal square holding an enemy.
        assert_eq!(sorted(position.threats(C3)), sorted(vec![B1, C2]));
        assert_eq!(position.threats(E5), vec![E7]);
        assert_eq!(position.threats(F6), vec![G8, F7]);
        assert!(position.threats(E1).is_empty());
    }

    #[test]
    fn back_rank_start() {
        let position = Position::from_back_rank("rnbqkbnr").unwrap();
        assert_eq!(position, Position::start_position());

        let position = Position::from_back_rank("NRBKQBRN").unwrap();
        assert_eq!(
            position.to_fen(),
            "nrbkqbrn/pppppppp/8/8/8/8/PPPPPPPP/NRBKQBRN w KQkq - 0 1"
        );

        for invalid in ["rnbqkbn", "rnbqkbnrr", "rnbqkbnx", "rnb4r"] {
            let err = Position::from_back_rank(invalid).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Fen, "{invalid}");
        }
    }

    #[test]
    fn history_and_squares() {
        let mut position = Position::start_position();
        for token in ["e4", "e5", "Nf3"] {
            position.do_move(token).unwrap();
        }
        let notations: Vec<&str> = position.history().iter().map(|m| m.notation()).collect();
        assert_eq!(notations, vec!["e4", "e5", "Nf3"]);
        assert_eq!(*position.history()[2].piece_kind(), PieceKind::Knight);

        assert_eq!(position.squares().count(), 64);
        assert_eq!(position.squares().filter(|(_, piece)| piece.is_some()).count(), 32);
        assert_eq!(
            position.squares().find(|(_, piece)| piece.is_some()),
            Some((A8, Some(Piece::new(Color::Black, PieceKind::Rook))))
        );
    }

    #[test]
    fn make_move_leaves_original() {
        let position = Position::start_position();
        let next = position.make_move("Nc3").unwrap();
        assert_eq!(position, Position::start_position());
        assert_eq!(next.placement(), "rnbqkbnr/pppppppp/8/8/8/2N5/PPPPPPPP/R1BQKBNR");
        assert!(position.make_move("Nc4").is_err());
    }
}
