use std::{io, path::PathBuf, time::Duration};

use blockfall_engine::{Direction, GameSession, ManualScheduler, PieceSeed};
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use serde::Serialize;

use crate::{config::GameArgs, logging};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(crate) game: GameArgs,
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Seed for the random commands
    #[clap(long, default_value_t = 0)]
    pub(crate) command_seed: u64,
    /// Stop after this many game ticks
    #[clap(long, default_value_t = 10_000)]
    pub(crate) max_ticks: u64,
    /// Write logs to this file instead of stderr
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    seed: PieceSeed,
    ticks: u64,
    elapsed_ms: u64,
    game_over: bool,
    score: u64,
    level: u32,
    drop_interval_ms: u64,
    completed_pieces: u64,
    cleared_lines: u64,
    line_cleared_counter: [u64; 5],
    level_ups: usize,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    logging::init_or_stderr(arg.log_file.as_deref())?;
    let config = arg.game.load()?;
    let mut session = match arg.seed {
        Some(seed) => GameSession::with_seed(config, seed)?,
        None => GameSession::new(config)?,
    };
    let mut rng = StdRng::seed_from_u64(arg.command_seed);
    log::info!("simulating game with seed {}", session.seed());
    let summary = simulate(&mut session, &mut rng, arg.max_ticks);
    log::info!(
        "simulation finished after {} ticks with score {}",
        summary.ticks,
        summary.score
    );

    serde_json::to_writer_pretty(io::stdout().lock(), &summary)?;
    println!();
    Ok(())
}

/// Plays until game over or `max_ticks` game ticks, sending a random
/// command (or none) before each tick.
fn simulate<R>(session: &mut GameSession, rng: &mut R, max_ticks: u64) -> SimulationSummary
where
    R: Rng + ?Sized,
{
    const DIRECTIONS: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    let mut scheduler = ManualScheduler::new();
    let mut level_ups = 0;
    session.start(&mut scheduler);

    while session.ticks() < max_ticks {
        if let Some(&direction) = DIRECTIONS.get(rng.random_range(0..DIRECTIONS.len() + 2)) {
            session.handle_command(direction, &mut scheduler);
        }
        if session.state().is_playing()
            && session.ticks() < max_ticks
            && scheduler.fire().is_some()
        {
            session.tick(&mut scheduler);
        }
        for event in session.take_events() {
            log::debug!("tick {}: {event:?}", session.ticks());
            if event.is_level_up() {
                level_ups += 1;
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    let progression = session.progression();
    SimulationSummary {
        seed: session.seed(),
        ticks: session.ticks(),
        elapsed_ms: millis(scheduler.elapsed()),
        game_over: session.is_game_over(),
        score: session.score(),
        level: session.level(),
        drop_interval_ms: millis(session.drop_interval()),
        completed_pieces: progression.completed_pieces(),
        cleared_lines: progression.total_cleared_lines(),
        line_cleared_counter: *progression.line_cleared_counter(),
        level_ups,
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
