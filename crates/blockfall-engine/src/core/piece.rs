use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest row or column count of any shape in the catalog.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Upper bound on the number of occupied cells in a shape.
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
}

/// Uniform choice among the seven kinds, one independent draw per spawn.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }
}

/// An immutable rectangular matrix of occupied/empty cells.
///
/// Shapes are small value types: rotating one returns a new shape and never
/// edits the original. Cells outside `width × height` are always empty, so two
/// shapes with the same footprint compare equal.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceShape};
///
/// let shape = PieceShape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]);
/// assert_eq!(shape, PieceKind::L.shape());
///
/// let rotated = shape.rotated();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Builds a shape from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged or larger than
    /// [`MAX_SHAPE_SIZE`] in either direction.
    #[must_use]
    pub const fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_SHAPE_SIZE, "invalid shape height");
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE, "invalid shape width");

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < height {
            assert!(rows[y].len() == width, "shape rows must have equal length");
            let mut x = 0;
            while x < width {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at `(dx, dy)` is occupied.
    ///
    /// Coordinates outside the shape are reported as empty.
    #[must_use]
    pub const fn is_occupied(&self, dx: usize, dy: usize) -> bool {
        dx < self.width && dy < self.height && self.cells[dy][dx]
    }

    /// Returns the occupied cells as `(dx, dy)` offsets, row by row.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(usize, usize), MAX_SHAPE_CELLS> {
        let mut cells = ArrayVec::new();
        for (dy, row) in self.rows().enumerate() {
            for (dx, _) in row.iter().enumerate().filter(|(_, occupied)| **occupied) {
                cells.push((dx, dy));
            }
        }
        cells
    }

    /// Returns an iterator over the rows of the matrix, each `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height]
            .iter()
            .map(|row| &row[..self.width])
    }

    /// Returns the quarter-turned shape: transpose, then reverse the row order.
    ///
    /// An `R×C` shape becomes `C×R`. Only this one direction exists.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < self.width {
            let mut x = 0;
            while x < self.height {
                cells[y][x] = self.cells[x][self.width - 1 - y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // I-piece
    PieceShape::from_rows(&[&[1, 1, 1, 1]]),
    // O-piece
    PieceShape::from_rows(&[&[1, 1], &[1, 1]]),
    // T-piece
    PieceShape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
    // S-piece
    PieceShape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    // Z-piece
    PieceShape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
    // L-piece
    PieceShape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
    // J-piece
    PieceShape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
];

/// Position of a piece anchor (the top-left corner of its shape matrix).
///
/// Coordinates are signed: the anchor of a rotated or wall-hugging piece may
/// sit outside the board as long as only empty shape cells hang over the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The currently falling piece: a kind, its current shape and its anchor.
///
/// Values are immutable; moving and rotating return new pieces, and the
/// controller only swaps them in after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: PieceShape,
    position: PiecePosition,
}

impl ActivePiece {
    #[must_use]
    pub const fn new(kind: PieceKind, shape: PieceShape, position: PiecePosition) -> Self {
        Self {
            kind,
            shape,
            position,
        }
    }

    /// Places `kind` in its spawn orientation at the top center of a board
    /// `board_width` cells wide: `x = floor(W / 2) - floor(shape_width / 2)`, `y = 0`.
    #[must_use]
    pub const fn spawned(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = to_coord(board_width / 2) - to_coord(shape.width() / 2);
        Self::new(kind, shape, PiecePosition::new(x, 0))
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.kind, self.shape, self.position.offset(dx, dy))
    }

    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self::new(self.kind, self.shape.rotated(), self.position)
    }

    /// Returns the board coordinates covered by the occupied shape cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().into_iter().map(move |(dx, dy)| {
            (
                self.position.x + to_coord(dx),
                self.position.y + to_coord(dy),
            )
        })
    }
}

/// Converts a grid offset into a signed coordinate.
///
/// Inputs are bounded by the board size limit, far below `i32::MAX`.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn to_coord(value: usize) -> i32 {
    value as i32
}
