//! Game-state engine for a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - passive data: piece shapes, the board and placement validation
//! - [`engine`] - game rules: the active piece controller, progression,
//!   the tick scheduler seam and the [`GameSession`] that ties them together
//!
//! Rendering and input are left to collaborators. They read state through the
//! session accessors and feed it with [`GameSession::tick`] and
//! [`GameSession::handle_command`].
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Direction, GameConfig, GameSession, ManualScheduler, PieceSeed};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut session = GameSession::with_seed(GameConfig::default(), seed).unwrap();
//! let mut scheduler = ManualScheduler::new();
//! session.start(&mut scheduler);
//!
//! session.handle_command(Direction::Left, &mut scheduler);
//! session.tick(&mut scheduler);
//!
//! assert!(session.state().is_playing());
//! assert_eq!(session.score(), 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Signals that a freshly spawned piece does not fit on the board.
///
/// This is the only way a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{kind:?} piece collides at its spawn position")]
pub struct SpawnCollisionError {
    pub kind: PieceKind,
}
