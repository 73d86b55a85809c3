//! Game rules and session lifecycle.
//!
//! This module builds the game on top of the passive [`core`](crate::core) types:
//!
//! - [`GameConfig`] - board size and timing/scoring constants
//! - [`PieceSource`] / [`RandomPieceSource`] - injected piece randomness
//! - [`PieceController`] - spawn, move, rotate and commit the active piece
//! - [`Progression`] - score, level and drop interval
//! - [`Scheduler`] - the periodic tick driver the session talks to
//! - [`GameSession`] - one game from reset to game over
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] and call [`GameSession::start`] with a scheduler
//! 2. The scheduler calls [`GameSession::tick`] every drop interval
//! 3. Input collaborators call [`GameSession::handle_command`]
//! 4. A piece that cannot fall is committed, rows are cleared, a new piece spawns
//! 5. The game ends when a new piece does not fit; [`GameSession::reset`] starts over

pub use self::{
    config::*, controller::*, game_session::*, piece_source::*, progression::*, scheduler::*,
};

mod config;
mod controller;
mod game_session;
mod piece_source;
mod progression;
mod scheduler;
