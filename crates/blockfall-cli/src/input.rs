use blockfall_engine::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Command(Direction),
    Restart,
    Quit,
}

pub(crate) fn key_action(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Left => Action::Command(Direction::Left),
        KeyCode::Right => Action::Command(Direction::Right),
        KeyCode::Down => Action::Command(Direction::Down),
        KeyCode::Up => Action::Command(Direction::Up),
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Turns a mouse drag into a swipe.
///
/// The dominant axis of the drag decides the direction. A release at the
/// press position is a click, not a swipe.
#[derive(Debug, Default)]
pub(crate) struct SwipeTracker {
    origin: Option<Position>,
}

impl SwipeTracker {
    pub(crate) fn press(&mut self, position: Position) {
        self.origin = Some(position);
    }

    pub(crate) fn cancel(&mut self) {
        self.origin = None;
    }

    pub(crate) fn release(&mut self, position: Position) -> Option<Direction> {
        let origin = self.origin.take()?;
        let dx = i32::from(position.x) - i32::from(origin.x);
        // Terminal cells are roughly twice as tall as they are wide.
        let dy = 2 * (i32::from(position.y) - i32::from(origin.y));
        if dx == 0 && dy == 0 {
            return None;
        }
        let direction = if dx.abs() > dy.abs() {
            if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}
