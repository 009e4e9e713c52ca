//! List types used in Scoresheet.
//!
//! The underlying type of these lists may change at any time during
//! pre-1.0 development, so type aliases make changes easy.

use arrayvec::ArrayVec;

use crate::coretypes::{Move, Square, MAX_DESTINATIONS};

/// SquareList can hold at most `MAX_DESTINATIONS`, the most squares any single piece can move to.
pub type SquareList = ArrayVec<Square, MAX_DESTINATIONS>;

/// Ordered log of every move applied to a position.
pub type MoveHistory = Vec<Move>;

/// Returns a string with the displayed squares of a SquareList, space separated.
/// Display cannot be implemented on external types.
pub fn display(squares: &SquareList) -> String {
    let mut displayed = String::new();
    for square in squares.iter() {
        displayed.push_str(&square.to_string());
        displayed.push(' ');
    }
    displayed.pop();

    displayed
}
