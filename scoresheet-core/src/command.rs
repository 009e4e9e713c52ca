//! Line commands of the interactive scoresheet driver.

use std::fmt::{self, Display, Write};
use std::io;
use std::str::{FromStr, SplitWhitespace};

use crate::coretypes::{Move, Square};
use crate::error::{self, ErrorKind};
use crate::fen::Fen;
use crate::game::Game;
use crate::notation::Notation;
use crate::options::{Opt, RawOption};
use crate::position::Position;

/// Commands read from the driver's input, one per line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    Help,
    Quit,
    NewGame,
    Board,
    Fen,
    History,
    Debug(bool),
    SetOption(RawOption),
    Pos(Game),
    Moves(Vec<String>),
    Destinations(Square),
    Threats(Square),
}

impl Command {
    /// Parse a single input line into a Command if possible.
    /// A line made only of notation tokens is a list of moves.
    pub fn parse_command(input_str: &str) -> error::Result<Self> {
        let mut input = input_str.split_whitespace();
        let head = input
            .next()
            .ok_or((ErrorKind::CommandNoArgument, "empty line"))?;

        match head {
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "newgame" | "ng" => Ok(Command::NewGame),
            "board" => Ok(Command::Board),
            "fen" => Ok(Command::Fen),
            "history" => Ok(Command::History),
            "debug" => Self::parse_debug(input),
            "setoption" => Self::parse_setoption(input),
            "position" => Self::parse_pos(input),
            "moves" => Self::parse_moves(input),
            "destinations" => Self::parse_square(input).map(Command::Destinations),
            "threats" => Self::parse_square(input).map(Command::Threats),
            _ => {
                let tokens: Vec<&str> = input_str.split_whitespace().collect();
                match tokens.iter().all(|token| Notation::from_str(token).is_ok()) {
                    true => Ok(Command::Moves(
                        tokens.into_iter().map(String::from).collect(),
                    )),
                    false => Err((ErrorKind::CommandUnknown, head).into()),
                }
            }
        }
    }

    /// command: `debug [on | off]`
    fn parse_debug(mut input: SplitWhitespace) -> error::Result<Self> {
        let debug_mode_str = input
            .next()
            .ok_or((ErrorKind::CommandNoArgument, "debug expects on or off"))?;

        match debug_mode_str {
            "on" => Ok(Self::Debug(true)),
            "off" => Ok(Self::Debug(false)),
            _ => Err((ErrorKind::CommandMalformed, debug_mode_str).into()),
        }
    }

    /// Extract a `setoption` command if possible.
    /// command: `setoption name [id] (value x)`
    fn parse_setoption(mut input: SplitWhitespace) -> error::Result<Self> {
        let name = input
            .next()
            .ok_or((ErrorKind::CommandNoArgument, "setoption expects name"))?;
        (name == "name")
            .then_some(())
            .ok_or((ErrorKind::CommandMalformed, name))?;

        let mut name = String::new();
        let mut value = String::new();
        let mut had_value = false;

        // The id runs until the token `value` or end of input.
        for token in input.by_ref() {
            if token == "value" {
                had_value = true;
                break;
            } else {
                name.push_str(token);
                name.push(' ');
            }
        }
        name.pop();
        (!name.is_empty())
            .then_some(())
            .ok_or((ErrorKind::CommandNoArgument, "setoption missing option name"))?;

        if had_value {
            for token in input {
                value.push_str(token);
                value.push(' ');
            }
            value.pop();
            (!value.is_empty())
                .then_some(())
                .ok_or((ErrorKind::CommandNoArgument, "expected argument after value"))?;
        }

        Ok(Command::SetOption(RawOption {
            name: name.as_str().into(),
            value,
        }))
    }

    /// Extract a `position` command if possible.
    /// command: `position [fen fen_str | startpos] (moves token ...)`
    fn parse_pos(mut input: SplitWhitespace) -> error::Result<Self> {
        let position_input = input.next().ok_or((
            ErrorKind::CommandNoArgument,
            "position missing description [fen | startpos]",
        ))?;

        let base_position = match position_input {
            "startpos" => Position::start_position(),
            "fen" => {
                let mut fen_str = String::new();
                for _ in 0..6 {
                    fen_str.push_str(input.next().ok_or((
                        ErrorKind::CommandMalformed,
                        "fen expects 6 fields",
                    ))?);
                    fen_str.push(' ');
                }
                Position::parse_fen(&fen_str)?
            }
            _ => return Err((ErrorKind::CommandMalformed, position_input).into()),
        };

        match input.next() {
            Some("moves") => Game::new(base_position, input).map(Command::Pos),
            Some(other) => Err((ErrorKind::CommandMalformed, other).into()),
            None => Ok(Command::Pos(Game::from(base_position))),
        }
    }

    /// command: `moves token ...`
    fn parse_moves(input: SplitWhitespace) -> error::Result<Self> {
        let tokens: Vec<String> = input.map(String::from).collect();
        (!tokens.is_empty())
            .then_some(())
            .ok_or((ErrorKind::CommandNoArgument, "moves expects at least one token"))?;
        Ok(Command::Moves(tokens))
    }

    fn parse_square(mut input: SplitWhitespace) -> error::Result<Square> {
        let square_str = input
            .next()
            .ok_or((ErrorKind::CommandNoArgument, "expected a square"))?;
        Square::from_str(square_str)
    }
}

impl FromStr for Command {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        Self::parse_command(s)
    }
}

/// Text written back by the driver.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Response {
    /// Position string of the current position.
    Fen(String),
    /// Pretty board and position string.
    Board(String),
    /// Squares listed in id order.
    Squares(Square, Vec<Square>),
    History(Vec<Move>),
    Opt(Opt),
    Help,
}

impl Response {
    /// Write response to stdout.
    pub fn send(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        <io::StdoutLock as io::Write>::write_all(&mut handle, self.to_string().as_ref())?;
        <io::StdoutLock as io::Write>::flush(&mut handle)
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fen(fen) => writeln!(f, "{fen}"),
            Self::Board(board) => f.write_str(board),
            Self::Squares(from, squares) => {
                write!(f, "{from}:")?;
                for square in squares {
                    f.write_char(' ')?;
                    square.fmt(f)?;
                }
                f.write_char('\n')
            }
            Self::History(moves) => {
                for (ply, move_) in moves.iter().enumerate() {
                    writeln!(f, "{} {}", ply + 1, move_)?;
                }
                Ok(())
            }
            Self::Opt(opt) => writeln!(f, "{opt}"),
            Self::Help => f.write_str(HELP),
        }
    }
}

const HELP: &str = "\
commands:
  <token> ...                       apply notation tokens, like `e4 e5 Nf3`
  moves <token> ...                 same as above
  position [startpos | fen <fen>] [moves <token> ...]
  newgame | ng                      reset to the start position
  board                             print the board
  fen                               print the position string
  history                           list applied moves
  destinations <square>             destinations of the piece on square
  threats <square>                  pieces that can move to square
  setoption name <id> [value <x>]   options: Debug, ShowBoard, StartFen
  debug [on | off]
  help
  quit | exit
";
