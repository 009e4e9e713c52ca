//! Directions and ray walking over the square grid.

use crate::coretypes::Square;

/// A step of (rows, columns). Row 0 is rank 8, so a negative row step moves toward rank 8.
pub(crate) type Direction = (i8, i8);

/// North, West, South, East.
pub(crate) const ORTHOGONAL: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// NorthWest, NorthEast, SouthWest, SouthEast.
pub(crate) const DIAGONAL: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal then diagonal, the rays of a queen and king.
pub(crate) const ALL_DIRECTIONS: [Direction; 8] = [
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

pub(crate) const KNIGHT_JUMPS: [Direction; 8] = [
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// Returns true if a direction moves along a rank or file.
pub(crate) const fn is_orthogonal((rows, columns): Direction) -> bool {
    rows == 0 || columns == 0
}

/// Iterator over squares from an origin outward along a direction,
/// origin exclusive, ending at the board edge. Yields at most 7 squares.
pub(crate) struct Ray {
    current: Option<Square>,
    direction: Direction,
}

impl Iterator for Ray {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let (rows, columns) = self.direction;
        self.current = self.current.and_then(|square| square.offset(rows, columns));
        self.current
    }
}

/// Walk outward from origin along direction.
pub(crate) fn ray(origin: Square, direction: Direction) -> Ray {
    Ray {
        current: Some(origin),
        direction,
    }
}
