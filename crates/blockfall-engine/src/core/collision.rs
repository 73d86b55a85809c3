//! Placement validation.
//!
//! Only occupied shape cells are checked. Empty cells of the bounding box may
//! hang outside the board, which matters for spawn centering and for
//! rotating next to a wall.

use super::{
    board::Board,
    piece::{ActivePiece, PieceShape, to_coord},
};

/// Returns `true` if `shape` anchored at `(x, y)` fits on `board`.
///
/// A placement fits when every occupied cell lands inside the grid on an
/// empty cell.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, PieceShape, collision};
///
/// let board = Board::new(4, 4);
/// let shape = PieceShape::from_rows(&[&[0, 1], &[0, 1]]);
///
/// // The empty left column may sit outside the board.
/// assert!(collision::is_valid(&shape, -1, 0, &board));
/// assert!(!collision::is_valid(&shape, -2, 0, &board));
/// ```
#[must_use]
pub fn is_valid(shape: &PieceShape, x: i32, y: i32, board: &Board) -> bool {
    shape
        .occupied_cells()
        .into_iter()
        .all(|(dx, dy)| !board.is_cell_blocked(x + to_coord(dx), y + to_coord(dy)))
}

/// Shorthand for [`is_valid`] on an active piece.
#[must_use]
pub fn fits(piece: &ActivePiece, board: &Board) -> bool {
    let position = piece.position();
    is_valid(piece.shape(), position.x, position.y, board)
}
