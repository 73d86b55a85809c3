use blockfall_engine::Direction;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Position, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use super::style;

const BUTTON_WIDTH: u16 = 7;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_SPACING: u16 = 1;

/// `(direction, label, column, row)` of each button in the 3x2 grid.
const BUTTONS: [(Direction, &str, u16, u16); 4] = [
    (Direction::Up, "↑", 1, 0),
    (Direction::Left, "←", 0, 1),
    (Direction::Down, "↓", 1, 1),
    (Direction::Right, "→", 2, 1),
];

/// Clickable arrow buttons.
#[derive(Debug, Default)]
pub(crate) struct KeypadDisplay;

impl KeypadDisplay {
    pub(crate) const WIDTH: u16 = 3 * BUTTON_WIDTH + 2 * BUTTON_SPACING;
    pub(crate) const HEIGHT: u16 = 2 * BUTTON_HEIGHT;

    fn buttons(area: Rect) -> impl Iterator<Item = (Direction, &'static str, Rect)> {
        BUTTONS.into_iter().map(move |(direction, label, col, row)| {
            let button = Rect::new(
                area.x + col * (BUTTON_WIDTH + BUTTON_SPACING),
                area.y + row * BUTTON_HEIGHT,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            );
            (direction, label, button.intersection(area))
        })
    }

    /// Returns the direction of the button under `position`, if any.
    pub(crate) fn hit_test(area: Rect, position: Position) -> Option<Direction> {
        Self::buttons(area)
            .find(|(_, _, button)| button.contains(position))
            .map(|(direction, _, _)| direction)
    }
}

impl Widget for &KeypadDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (_, label, button) in KeypadDisplay::buttons(area) {
            if button.is_empty() {
                continue;
            }
            let block = BlockWidget::bordered().style(style::BUTTON);
            let inner = block.inner(button);
            block.render(button, buf);
            Line::styled(label, style::BUTTON)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
