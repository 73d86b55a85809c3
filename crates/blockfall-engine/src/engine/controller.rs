use crate::{
    SpawnCollisionError,
    core::{ActivePiece, Board, collision},
};

use super::PieceSource;

/// Owns the falling piece and every mutation of it.
///
/// Each operation builds the candidate piece first and swaps it in only after
/// [`collision::fits`] accepts it, so a rejected move or rotation leaves the
/// controller exactly as it was.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, FixedPieceSource, PieceController, PieceKind};
///
/// let board = Board::new(12, 20);
/// let mut controller = PieceController::new(FixedPieceSource::new([PieceKind::I]));
/// controller.spawn(&board).unwrap();
///
/// assert!(controller.try_move(&board, -4, 0));
/// assert!(!controller.try_move(&board, -1, 0));
/// assert_eq!(controller.active().unwrap().position().x, 0);
/// ```
#[derive(Debug, Clone)]
pub struct PieceController<P> {
    source: P,
    active: Option<ActivePiece>,
}

impl<P> PieceController<P>
where
    P: PieceSource,
{
    #[must_use]
    pub fn new(source: P) -> Self {
        Self {
            source,
            active: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> &P {
        &self.source
    }

    /// Draws the next kind and places it at the top center of `board`.
    ///
    /// If the spawn placement collides, no piece is left active and the
    /// collision is returned: the game is over.
    pub fn spawn(&mut self, board: &Board) -> Result<&ActivePiece, SpawnCollisionError> {
        let kind = self.source.next_piece();
        let piece = ActivePiece::spawned(kind, board.width());
        if !collision::fits(&piece, board) {
            self.active = None;
            return Err(SpawnCollisionError { kind });
        }
        log::debug!("spawned {kind:?} at {:?}", piece.position());
        Ok(&*self.active.insert(piece))
    }

    /// Moves the active piece by `(dx, dy)` if the destination is free.
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        self.try_replace(board, |piece| piece.moved(dx, dy))
    }

    /// Rotates the active piece in place if the rotated shape fits at the
    /// current anchor. There is no wall-kick search.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        self.try_replace(board, ActivePiece::rotated)
    }

    fn try_replace<F>(&mut self, board: &Board, f: F) -> bool
    where
        F: FnOnce(&ActivePiece) -> ActivePiece,
    {
        let Some(current) = &self.active else {
            return false;
        };
        let candidate = f(current);
        if !collision::fits(&candidate, board) {
            log::trace!("rejected {:?} at {:?}", candidate.kind(), candidate.position());
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Copies the active piece into `board` and consumes it.
    pub fn commit(&mut self, board: &mut Board) -> Option<ActivePiece> {
        let piece = self.active.take()?;
        board.commit_piece(&piece);
        Some(piece)
    }

    /// Drops the active piece without touching the board.
    pub fn discard(&mut self) {
        self.active = None;
    }
}
