//! Board and piece data structures.
//!
//! - [`PieceKind`] / [`PieceShape`] - the fixed catalog of seven shapes
//! - [`ActivePiece`] - a shape anchored at a position on the board
//! - [`Board`] - the grid of settled cells, including row clearing
//! - [`collision`] - placement validation shared by spawning, moving and rotating

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub mod collision;
pub(crate) mod piece;
