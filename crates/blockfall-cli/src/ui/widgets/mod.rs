use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{
    block_display::*, board_display::*, keypad_display::*, session_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod keypad_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const BUTTON: Style = fg_bg(color::BLACK, color::GRAY);
    pub const MESSAGE: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const I_BLOCK: Style = bg_only(color::CYAN);
    pub const O_BLOCK: Style = bg_only(color::YELLOW);
    pub const S_BLOCK: Style = bg_only(color::GREEN);
    pub const Z_BLOCK: Style = bg_only(color::RED);
    pub const J_BLOCK: Style = bg_only(color::BLUE);
    pub const L_BLOCK: Style = bg_only(color::ORANGE);
    pub const T_BLOCK: Style = bg_only(color::MAGENTA);
}

/// Columns and rows taken up by an optional border block.
fn block_margin(block: Option<&BlockWidget>) -> (u16, u16) {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    (probe.width - inner.width, probe.height - inner.height)
}
