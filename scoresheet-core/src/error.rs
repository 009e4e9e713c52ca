//! Scoresheet error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

use crate::fen::ParseFenError;

/// Scoresheet generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for Scoresheet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Fen error kinds.
    Fen,

    /// Square parse string malformed.
    ParseSquareMalformed,
    /// File parse string malformed.
    ParseFileMalformed,
    /// Rank parse string malformed.
    ParseRankMalformed,
    /// Color parse string malformed.
    ParseColorMalformed,
    /// Piece parse string malformed.
    ParsePieceMalformed,
    /// Castling parse string malformed.
    ParseCastlingMalformed,

    /// Notation token does not have the shape of a move.
    NotationMalformed,
    /// Notation token names no piece that can make the move.
    NotationUnresolved,
    /// Notation token names more than one piece that can make the move.
    NotationAmbiguous,
    /// Castling was requested without the right, the rook, or a clear path.
    NotationIllegalCastling,

    /// Applying a move would overflow the halfmove clock or fullmove number.
    MoveCounterOverflow,

    /// A token in a replayed move list could not be applied to its position.
    GameIllegalMove,

    /// An argument was expected following a command, but none was provided.
    CommandNoArgument,
    /// Received an unknown command.
    CommandUnknown,
    /// Command arguments are in the wrong order or form.
    CommandMalformed,
    /// Option fails to update.
    OptionCannotUpdate,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fen => "fen",

            ErrorKind::ParseSquareMalformed => "parse square malformed",
            ErrorKind::ParseFileMalformed => "parse file malformed",
            ErrorKind::ParseRankMalformed => "parse rank malformed",
            ErrorKind::ParseColorMalformed => "parse color malformed",
            ErrorKind::ParsePieceMalformed => "parse piece malformed",
            ErrorKind::ParseCastlingMalformed => "parse castling malformed",

            ErrorKind::NotationMalformed => "notation malformed",
            ErrorKind::NotationUnresolved => "notation unresolved",
            ErrorKind::NotationAmbiguous => "notation ambiguous",
            ErrorKind::NotationIllegalCastling => "notation illegal castling",

            ErrorKind::MoveCounterOverflow => "move counter overflow",

            ErrorKind::GameIllegalMove => "game illegal move",

            ErrorKind::CommandNoArgument => "command no argument",
            ErrorKind::CommandUnknown => "command unknown",
            ErrorKind::CommandMalformed => "command malformed",
            ErrorKind::OptionCannotUpdate => "option cannot update",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for Scoresheet.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }

    /// Returns the kind of this error, regardless of variant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind)
            | Error::Message(error_kind, _)
            | Error::Custom(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl From<ParseFenError> for Error {
    fn from(error: ParseFenError) -> Self {
        Self::Custom(ErrorKind::Fen, error.into())
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}
