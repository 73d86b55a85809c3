use std::time::{Duration, Instant};

use blockfall_engine::{Direction, GameSession, Scheduler};
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
};
use ratatui_runtime::{App, RenderMode, Runtime};

use crate::{
    input::{self, Action, SwipeTracker},
    ui::{
        messages::Messages,
        widgets::{KeypadDisplay, PlayLayout, SessionDisplay},
    },
};

const FPS: f64 = 30.0;

/// Feeds the session's tick schedule into the runtime's tick timer.
struct RuntimeScheduler<'a>(&'a mut Runtime);

impl Scheduler for RuntimeScheduler<'_> {
    fn schedule_next(&mut self, interval: Duration) {
        self.0.start_ticks(interval);
    }

    fn cancel(&mut self) {
        self.0.cancel_ticks();
    }
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    messages: Messages,
    swipe: SwipeTracker,
    show_keypad: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: GameSession, show_keypad: bool) -> Self {
        Self {
            session,
            messages: Messages::default(),
            swipe: SwipeTracker::default(),
            show_keypad,
            is_exiting: false,
        }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    fn command(&mut self, runtime: &mut Runtime, direction: Direction) {
        self.session
            .handle_command(direction, &mut RuntimeScheduler(runtime));
        self.drain_events();
    }

    fn restart(&mut self, runtime: &mut Runtime) {
        log::info!("restarting, previous score {}", self.session.score());
        self.session.reset(&mut RuntimeScheduler(runtime));
        self.messages.clear();
        self.swipe.cancel();
    }

    fn drain_events(&mut self) {
        let events = self.session.take_events();
        self.messages.push_events(&events, Instant::now());
    }

    fn layout(&self, area: Rect) -> PlayLayout {
        PlayLayout::new(area, &self.session, self.show_keypad)
    }

    fn handle_mouse(&mut self, runtime: &mut Runtime, mouse: MouseEvent, layout: &PlayLayout) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.session.is_game_over() {
                    if layout.restart_button.contains(position) {
                        self.restart(runtime);
                    }
                    return;
                }
                let pressed = layout
                    .keypad
                    .and_then(|keypad| KeypadDisplay::hit_test(keypad, position));
                if let Some(direction) = pressed {
                    self.command(runtime, direction);
                } else if layout.board.contains(position) {
                    self.swipe.press(position);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(direction) = self.swipe.release(position) {
                    self.command(runtime, direction);
                }
            }
            _ => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::interval_from_rate(FPS));
        runtime.set_mouse_capture(true);
        self.session.start(&mut RuntimeScheduler(runtime));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_press_event() {
            match input::key_action(key) {
                Some(Action::Command(direction)) => self.command(runtime, direction),
                Some(Action::Restart) => self.restart(runtime),
                Some(Action::Quit) => self.is_exiting = true,
                None => {}
            }
            return;
        }
        if let Event::Mouse(mouse) = event {
            let (width, height) = match crossterm::terminal::size() {
                Ok(size) => size,
                Err(err) => {
                    log::warn!("failed to read terminal size: {err}");
                    return;
                }
            };
            let layout = self.layout(Rect::new(0, 0, width, height));
            self.handle_mouse(runtime, mouse, &layout);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = self.layout(area);
        let display = SessionDisplay::new(&self.session, &layout)
            .messages(self.messages.visible(Instant::now()));
        frame.render_widget(display, area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.session.tick(&mut RuntimeScheduler(runtime));
        self.drain_events();
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, PieceSeed};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    const AREA: Rect = Rect::new(0, 0, 80, 30);

    fn app(config: GameConfig) -> (PlayApp, Runtime) {
        let session = GameSession::with_seed(config, PieceSeed::from_bytes([3; 16])).unwrap();
        let mut app = PlayApp::new(session, true);
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        (app, runtime)
    }

    fn press(app: &mut PlayApp, runtime: &mut Runtime, code: KeyCode) {
        app.handle_event(runtime, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn mouse(kind: MouseEventKind, position: Position) -> MouseEvent {
        MouseEvent {
            kind,
            column: position.x,
            row: position.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(app: &mut PlayApp, runtime: &mut Runtime, position: Position) {
        let layout = app.layout(AREA);
        let down = mouse(MouseEventKind::Down(MouseButton::Left), position);
        app.handle_mouse(runtime, down, &layout);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), position);
        app.handle_mouse(runtime, up, &layout);
    }

    fn piece_x(app: &PlayApp) -> i32 {
        app.session().active_piece().unwrap().position().x
    }

    #[test]
    fn test_init_starts_ticks() {
        let (_app, runtime) = app(GameConfig::default());
        assert_eq!(runtime.tick_interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_keys_drive_session() {
        let (mut app, mut runtime) = app(GameConfig::default());
        let x = piece_x(&app);
        press(&mut app, &mut runtime, KeyCode::Left);
        assert_eq!(piece_x(&app), x - 1);
        press(&mut app, &mut runtime, KeyCode::Down);
        assert_eq!(app.session().ticks(), 1);

        press(&mut app, &mut runtime, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_update_ticks_session() {
        let (mut app, mut runtime) = app(GameConfig::default());
        app.update(&mut runtime);
        app.update(&mut runtime);
        assert_eq!(app.session().ticks(), 2);
        assert_eq!(app.session().active_piece().unwrap().position().y, 2);
    }

    #[test]
    fn test_keypad_click_sends_command() {
        let (mut app, mut runtime) = app(GameConfig::default());
        let keypad = app.layout(AREA).keypad.unwrap();
        let x = piece_x(&app);

        // Bottom-right button.
        let right = Position::new(keypad.right() - 2, keypad.bottom() - 2);
        click(&mut app, &mut runtime, right);
        assert_eq!(piece_x(&app), x + 1);
    }

    #[test]
    fn test_swipe_on_board_sends_command() {
        let (mut app, mut runtime) = app(GameConfig::default());
        let layout = app.layout(AREA);
        let x = piece_x(&app);

        let start = Position::new(layout.board.x + 10, layout.board.y + 5);
        let end = Position::new(start.x - 6, start.y);
        app.handle_mouse(
            &mut runtime,
            mouse(MouseEventKind::Down(MouseButton::Left), start),
            &layout,
        );
        app.handle_mouse(
            &mut runtime,
            mouse(MouseEventKind::Drag(MouseButton::Left), end),
            &layout,
        );
        app.handle_mouse(
            &mut runtime,
            mouse(MouseEventKind::Up(MouseButton::Left), end),
            &layout,
        );
        assert_eq!(piece_x(&app), x - 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut app, mut runtime) = app(GameConfig::default().with_size(4, 4));
        for _ in 0..1000 {
            if app.session().is_game_over() {
                break;
            }
            app.update(&mut runtime);
        }
        assert!(app.session().is_game_over());
        assert_eq!(runtime.tick_interval(), None);

        // Arrow keys and keypad clicks do nothing once the game is over.
        let board = app.session().board().clone();
        press(&mut app, &mut runtime, KeyCode::Down);
        let layout = app.layout(AREA);
        click(&mut app, &mut runtime, layout.keypad.unwrap().as_position());
        assert_eq!(*app.session().board(), board);

        click(&mut app, &mut runtime, layout.restart_button.as_position());
        assert!(app.session().state().is_playing());
        assert!(app.session().board().is_empty());
        assert_eq!(runtime.tick_interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_restart_key_resets_progress() {
        let (mut app, mut runtime) = app(GameConfig::default());
        for _ in 0..5 {
            press(&mut app, &mut runtime, KeyCode::Down);
        }
        press(&mut app, &mut runtime, KeyCode::Char('r'));
        assert_eq!(app.session().ticks(), 0);
        assert_eq!(app.session().score(), 0);
        assert_eq!(runtime.tick_interval(), Some(Duration::from_millis(1000)));
    }
}
