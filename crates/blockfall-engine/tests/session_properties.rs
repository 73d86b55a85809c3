use std::time::Duration;

use blockfall_engine::{
    Direction, GameConfig, GameSession, ManualScheduler, PieceSeed, RandomPieceSource,
    core::collision,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Input {
    Command(Direction),
    Tick,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        1 => Just(Input::Command(Direction::Left)),
        1 => Just(Input::Command(Direction::Right)),
        1 => Just(Input::Command(Direction::Down)),
        1 => Just(Input::Command(Direction::Up)),
        3 => Just(Input::Tick),
    ]
}

fn new_session(seed: [u8; 16], width: usize, height: usize) -> GameSession<RandomPieceSource> {
    let config = GameConfig::default().with_size(width, height);
    GameSession::with_seed(config, PieceSeed::from_bytes(seed)).unwrap()
}

fn apply(session: &mut GameSession, scheduler: &mut ManualScheduler, input: Input) {
    match input {
        Input::Command(direction) => {
            session.handle_command(direction, scheduler);
        }
        Input::Tick => session.tick(scheduler),
    }
}

fn assert_consistent(session: &GameSession, scheduler: &ManualScheduler) {
    let config = session.config();
    let progression = session.progression();
    let clear_events: u64 = progression.line_cleared_counter()[1..].iter().sum();

    assert_eq!(
        session.score(),
        config.score_per_line * progression.total_cleared_lines()
    );
    assert_eq!(u64::from(session.level()), 1 + clear_events);
    assert!(session.drop_interval() >= Duration::from_millis(config.min_drop_interval_ms));

    if session.state().is_playing() {
        let piece = session.active_piece().unwrap();
        assert!(collision::fits(piece, session.board()));
        assert_eq!(scheduler.interval(), Some(session.drop_interval()));
    } else {
        assert!(session.active_piece().is_none());
        assert!(!scheduler.is_active());
    }
    for row in session.board().rows() {
        assert!(row.iter().any(|cell| cell.is_empty()));
    }
}

proptest! {
    #[test]
    fn random_play_keeps_invariants(
        seed in any::<[u8; 16]>(),
        width in 4usize..=14,
        height in 4usize..=22,
        inputs in prop::collection::vec(input(), 1..400),
    ) {
        let mut session = new_session(seed, width, height);
        let mut scheduler = ManualScheduler::new();
        session.start(&mut scheduler);
        assert_consistent(&session, &scheduler);

        for input in inputs {
            let score = session.score();
            let level = session.level();
            let interval = session.drop_interval();
            let was_over = session.is_game_over();

            apply(&mut session, &mut scheduler, input);

            prop_assert!(session.score() >= score);
            prop_assert!(session.level() >= level);
            prop_assert!(session.drop_interval() <= interval);
            if was_over {
                prop_assert!(session.is_game_over());
            }
            assert_consistent(&session, &scheduler);
        }
    }

    #[test]
    fn game_over_is_terminal_until_reset(
        seed in any::<[u8; 16]>(),
        inputs in prop::collection::vec(input(), 1..50),
    ) {
        let mut session = new_session(seed, 4, 4);
        let mut scheduler = ManualScheduler::new();
        session.start(&mut scheduler);
        for _ in 0..10_000 {
            if session.is_game_over() {
                break;
            }
            session.tick(&mut scheduler);
        }
        prop_assume!(session.is_game_over());

        let board = session.board().clone();
        let score = session.score();
        for input in inputs {
            apply(&mut session, &mut scheduler, input);
        }
        prop_assert!(session.is_game_over());
        prop_assert_eq!(session.board(), &board);
        prop_assert_eq!(session.score(), score);

        session.reset(&mut scheduler);
        prop_assert!(session.state().is_playing());
        prop_assert!(session.board().is_empty());
        prop_assert_eq!(scheduler.interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn same_seed_replays_same_game(
        seed in any::<[u8; 16]>(),
        inputs in prop::collection::vec(input(), 1..200),
    ) {
        let mut a = new_session(seed, 12, 20);
        let mut b = new_session(seed, 12, 20);
        let mut scheduler = ManualScheduler::new();
        for input in inputs {
            apply(&mut a, &mut scheduler, input);
            apply(&mut b, &mut scheduler, input);
        }
        prop_assert_eq!(a.board(), b.board());
        prop_assert_eq!(a.active_piece(), b.active_piece());
        prop_assert_eq!(a.score(), b.score());
        prop_assert_eq!(a.state(), b.state());
    }
}
