use std::fmt;

use super::piece::{ActivePiece, PieceKind};

/// Largest accepted board width or height.
pub const MAX_BOARD_SIZE: usize = 255;

/// A single board cell.
///
/// Settled cells remember which piece filled them so renderers can colour them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a committed piece.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

/// The grid of settled cells.
///
/// Cells are stored row-major, top row first. Dimensions never change after
/// creation; a new game gets a new board.
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell
/// - X increases rightward (columns), Y increases downward (rows)
/// - Queries take signed coordinates; anything outside the grid is blocked
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let board = Board::new(12, 20);
/// assert!(!board.is_cell_blocked(0, 0));
/// assert!(board.is_cell_blocked(-1, 0));
/// assert!(board.is_cell_blocked(0, 20));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty `width × height` board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds [`MAX_BOARD_SIZE`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&width) && (1..=MAX_BOARD_SIZE).contains(&height),
            "invalid board size {width}x{height}"
        );
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrites a single cell. Returns `false` (and does nothing) outside the grid.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Overwrites every cell of row `y`. Returns `false` outside the grid.
    pub fn fill_row(&mut self, y: i32, cell: Cell) -> bool {
        let Some(start) = self.index(0, y) else {
            return false;
        };
        self.cells[start..start + self.width].fill(cell);
        true
    }

    /// Returns `true` if `(x, y)` is outside the grid or already filled.
    #[must_use]
    pub fn is_cell_blocked(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_none_or(Cell::is_filled)
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Returns `true` if no cell is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Writes the piece's occupied cells into the grid.
    ///
    /// The caller validates the placement first; this only copies cells.
    /// Cells that fall outside the grid are skipped.
    pub fn commit_piece(&mut self, piece: &ActivePiece) {
        let cell = Cell::Filled(piece.kind());
        for (x, y) in piece.occupied_positions() {
            self.set_cell(x, y, cell);
        }
    }

    fn is_row_complete(&self, y: usize) -> bool {
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|c| c.is_filled())
    }

    /// Removes every completed row and returns how many were removed.
    ///
    /// Rows above a removed row shift down and keep their order; the same
    /// number of empty rows enter at the top. Scanning goes bottom-up and each
    /// row is tested before anything is moved into its slot, so the result is
    /// the same as collecting all completed rows first and removing them
    /// afterwards.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.is_row_complete(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                let start = y * width;
                self.cells
                    .copy_within(start..start + width, start + count * width);
            }
        }
        self.cells[..count * width].fill(Cell::Empty);
        count
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.width, self.height)?;
        for row in self.rows() {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(kind) => kind.as_char(),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
