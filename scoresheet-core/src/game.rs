//! Game structure.

use crate::coretypes::Move;
use crate::error::{self, ErrorKind};
use crate::position::Position;

/// Game contains information for an in progress game:
/// The base position the game started from, the sequence of notation tokens
/// that were played, and the current position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    pub base_position: Position,
    pub moves: Vec<String>,
    pub position: Position,
}

impl Game {
    /// Create a new Game from a base position and a sequence of notation tokens.
    /// This generates the current position by applying the sequence of moves to the base.
    /// If a move in the sequence cannot be applied, Err is returned.
    pub fn new<I, S>(base_position: Position, moves: I) -> error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut game = Self::from(base_position);
        for token in moves {
            game.do_move(token.as_ref())?;
        }
        Ok(game)
    }

    /// Create a new game in the standard chess start position.
    pub fn start_position() -> Self {
        Self::from(Position::start_position())
    }

    /// Apply one token to the current position and record it.
    /// On error the game is unchanged.
    pub fn do_move(&mut self, token: &str) -> error::Result<Move> {
        let move_ = self.position.do_move(token).map_err(|err| {
            error::Error::from((ErrorKind::GameIllegalMove, format!("{token}, {err}")))
        })?;
        self.moves.push(token.to_string());
        Ok(move_)
    }

    /// Apply tokens in order, stopping at the first that fails.
    /// Tokens before the failing one stay applied.
    /// Returns the moves applied.
    pub fn do_moves<I, S>(&mut self, tokens: I) -> error::Result<Vec<Move>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| self.do_move(token.as_ref()))
            .collect()
    }
}

/// Convert a position to a Game with no past moves.
impl From<Position> for Game {
    fn from(position: Position) -> Self {
        Self {
            base_position: position.clone(),
            moves: Vec::new(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn replay_from_base() {
        let game = Game::new(Position::start_position(), ["e4", "c5", "Nf3"]).unwrap();
        assert_eq!(game.moves, vec!["e4", "c5", "Nf3"]);
        assert_eq!(game.base_position, Position::start_position());
        assert_eq!(
            game.position.to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn illegal_move_is_an_error() {
        let err = Game::new(Position::start_position(), ["e4", "e4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameIllegalMove);
        assert!(err.to_string().contains("e4, notation unresolved: e4"));
    }

    #[test]
    fn do_moves_stops_at_first_failure() {
        let mut game = Game::start_position();
        let err = game.do_moves(vec!["d4", "d5", "Bxh7", "Nf3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameIllegalMove);
        assert_eq!(game.moves, vec!["d4", "d5"]);
        assert_eq!(game.position.history().len(), 2);

        let applied = game.do_moves(["Nf3"]).unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(*applied[0].from(), crate::coretypes::Square::G1);
    }
}
