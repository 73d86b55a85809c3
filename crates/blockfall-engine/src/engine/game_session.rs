use std::time::Duration;

use crate::core::{ActivePiece, Board};

use super::{
    ConfigError, GameConfig, LevelUp, PieceController, PieceSeed, PieceSource, Progression,
    RandomPieceSource, Scheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// One of the four commands input collaborators can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move one column left.
    Left,
    /// Move one column right.
    Right,
    /// Soft drop: exactly one tick.
    Down,
    /// Rotate.
    Up,
}

/// Notifications for UI collaborators, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// Rows were removed from the board.
    LinesCleared(usize),
    /// The level advanced and the tick period changed.
    LevelUp(LevelUp),
    /// A new piece did not fit; the game is over.
    GameOver,
}

/// A single game from reset to game over.
///
/// The session owns the board, the falling piece and the progression. It
/// advances only when a collaborator calls [`Self::tick`],
/// [`Self::handle_command`] or [`Self::reset`], and it talks back to the
/// tick driver through a [`Scheduler`]:
///
/// - level-up and reset reschedule the tick at the new drop interval
/// - game over cancels the tick
///
/// # Example
///
/// ```
/// use blockfall_engine::{
///     Direction, FixedPieceSource, GameConfig, GameSession, ManualScheduler, PieceKind,
/// };
///
/// let config = GameConfig::default().with_size(4, 4);
/// let source = FixedPieceSource::new([PieceKind::O]);
/// let mut session = GameSession::with_piece_source(config, source).unwrap();
/// let mut scheduler = ManualScheduler::new();
/// session.start(&mut scheduler);
///
/// // Drop O-pieces until the 4x4 board fills up.
/// while session.state().is_playing() {
///     session.handle_command(Direction::Down, &mut scheduler);
/// }
/// assert!(!scheduler.is_active());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<P = RandomPieceSource> {
    config: GameConfig,
    board: Board,
    controller: PieceController<P>,
    progression: Progression,
    state: SessionState,
    events: Vec<GameEvent>,
    ticks: u64,
}

impl GameSession<RandomPieceSource> {
    /// Creates a session with randomly seeded pieces.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_piece_source(config, RandomPieceSource::new())
    }

    /// Creates a session whose piece sequence is determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_piece_source(config, RandomPieceSource::with_seed(seed))
    }

    /// Returns the seed of the piece sequence.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.controller.source().seed()
    }
}

impl<P> GameSession<P>
where
    P: PieceSource,
{
    /// Creates a session drawing pieces from `source`.
    ///
    /// The session starts in the freshly reset state with its first piece
    /// spawned. Call [`Self::start`] to hand the tick period to a scheduler.
    pub fn with_piece_source(config: GameConfig, source: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            config,
            board: Board::new(config.width, config.height),
            controller: PieceController::new(source),
            progression: Progression::new(&config),
            state: SessionState::Playing,
            events: Vec::new(),
            ticks: 0,
        };
        session.restart();
        Ok(session)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.controller.active()
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.progression.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.progression.drop_interval()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns the number of ticks processed since the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Removes and returns the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hands the current tick period to `scheduler`, or cancels it if the
    /// game is already over.
    pub fn start<S>(&self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        match self.state {
            SessionState::Playing => scheduler.reschedule(self.drop_interval()),
            SessionState::GameOver => scheduler.cancel(),
        }
    }

    /// Starts a new game: empty board, score 0, level 1, initial interval,
    /// and a freshly spawned piece. Pending events are dropped.
    pub fn reset<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.restart();
        self.start(scheduler);
    }

    fn restart(&mut self) {
        log::debug!(
            "resetting session on a {}x{} board",
            self.config.width,
            self.config.height
        );
        self.board = Board::new(self.config.width, self.config.height);
        self.progression = Progression::new(&self.config);
        self.state = SessionState::Playing;
        self.events.clear();
        self.ticks = 0;
        self.controller.discard();
        self.spawn_next();
    }

    /// Advances the game by one gravity step.
    ///
    /// If the active piece can fall, it moves down one row and nothing else
    /// happens. Otherwise it is committed, completed rows are cleared, the
    /// cleared count is scored and the next piece spawns, which may end the
    /// game. Does nothing once the game is over.
    pub fn tick<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.state.is_game_over() {
            return;
        }
        self.ticks += 1;
        if self.controller.try_move(&self.board, 0, 1) {
            return;
        }
        self.complete_piece_drop(scheduler);
    }

    /// Applies a directional command. Does nothing once the game is over.
    ///
    /// Returns `true` if the command changed the game. A soft drop always
    /// does, since it either moves the piece or commits it.
    pub fn handle_command<S>(&mut self, direction: Direction, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if self.state.is_game_over() {
            return false;
        }
        match direction {
            Direction::Left => self.controller.try_move(&self.board, -1, 0),
            Direction::Right => self.controller.try_move(&self.board, 1, 0),
            Direction::Down => {
                self.tick(scheduler);
                true
            }
            Direction::Up => self.controller.try_rotate(&self.board),
        }
    }

    fn complete_piece_drop<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.controller.commit(&mut self.board).is_none() {
            log::warn!("no active piece to commit while playing");
        }
        let cleared_lines = self.board.clear_completed_rows();
        if cleared_lines > 0 {
            log::debug!("cleared {cleared_lines} line(s)");
            self.events.push(GameEvent::LinesCleared(cleared_lines));
        }
        if let Some(level_up) = self.progression.complete_piece_drop(cleared_lines) {
            log::debug!(
                "level {} reached, drop interval {} ms",
                level_up.level,
                level_up.drop_interval.as_millis()
            );
            self.events.push(GameEvent::LevelUp(level_up));
            scheduler.reschedule(level_up.drop_interval);
        }
        if !self.spawn_next() {
            scheduler.cancel();
        }
    }

    /// Spawns the next piece. Returns `false` if the game ended.
    fn spawn_next(&mut self) -> bool {
        match self.controller.spawn(&self.board) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("game over with score {}: {err}", self.progression.score());
                self.state = SessionState::GameOver;
                self.events.push(GameEvent::GameOver);
                false
            }
        }
    }
}
