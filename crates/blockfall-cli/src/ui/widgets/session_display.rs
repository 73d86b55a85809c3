use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, KeypadDisplay, SessionStatsDisplay, color, style};

const MESSAGES_HEIGHT: u16 = 4;
const GAME_OVER_HEIGHT: u16 = 5;
const RESTART_LABEL: &str = "[ Restart ]";

const HELP: &[(&str, &str)] = &[
    ("← →", "Move"),
    ("↓", "Drop"),
    ("↑", "Rotate"),
    ("R", "Restart"),
    ("Q", "Quit"),
];

fn board_display(session: &GameSession) -> BoardDisplay<'_> {
    let border_style = match session.state() {
        SessionState::Playing => color::WHITE,
        SessionState::GameOver => color::RED,
    };
    BoardDisplay::new(session.board(), session.config().block_size)
        .active_piece(session.active_piece())
        .block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        )
}

fn stats_display(session: &GameSession) -> SessionStatsDisplay<'_> {
    SessionStatsDisplay::new(session).block(
        Block::bordered()
            .title(Line::from("STATS").centered())
            .padding(Padding::horizontal(1))
            .style(style::DEFAULT),
    )
}

/// Screen regions of the play screen.
///
/// Drawing and mouse hit-testing both derive their areas from here, so a
/// click lands on what was drawn at the same terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlayLayout {
    pub(crate) board: Rect,
    pub(crate) stats: Rect,
    pub(crate) messages: Rect,
    pub(crate) keypad: Option<Rect>,
    pub(crate) help: Rect,
    pub(crate) game_over: Rect,
    pub(crate) restart_button: Rect,
}

impl PlayLayout {
    pub(crate) fn new(area: Rect, session: &GameSession, show_keypad: bool) -> Self {
        let board = board_display(session);
        let stats = stats_display(session);

        let [main_area, help] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let side_width = if show_keypad {
            u16::max(stats.width(), KeypadDisplay::WIDTH)
        } else {
            stats.width()
        };
        let [side_column, board_column] = Layout::horizontal([
            Constraint::Length(side_width),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let keypad_height = if show_keypad {
            KeypadDisplay::HEIGHT
        } else {
            0
        };
        let [stats_area, messages, keypad] = Layout::vertical([
            Constraint::Length(stats.height()),
            Constraint::Length(MESSAGES_HEIGHT),
            Constraint::Length(keypad_height),
        ])
        .areas(side_column);
        let keypad = show_keypad.then(|| {
            keypad.centered_horizontally(Constraint::Length(KeypadDisplay::WIDTH))
        });

        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);

        let game_over = centered_on(
            board_area,
            u16::max(board_area.width, text_width(RESTART_LABEL) + 4),
            GAME_OVER_HEIGHT,
        )
        .intersection(main_area);
        let [_, _, _, button_row, _] =
            Layout::vertical([Constraint::Length(1); 5]).areas(game_over);
        let restart_button =
            button_row.centered_horizontally(Constraint::Length(text_width(RESTART_LABEL)));

        Self {
            board: board_area,
            stats: stats_area,
            messages,
            keypad,
            help,
            game_over,
            restart_button,
        }
    }
}

fn centered_on(anchor: Rect, width: u16, height: u16) -> Rect {
    let x = (anchor.x + anchor.width / 2).saturating_sub(width / 2);
    let y = (anchor.y + anchor.height / 2).saturating_sub(height / 2);
    Rect::new(x, y, width, height)
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// The whole play screen: stats, messages, keypad, board, and the game-over
/// overlay.
#[derive(Debug)]
pub(crate) struct SessionDisplay<'a> {
    session: &'a GameSession,
    layout: &'a PlayLayout,
    messages: Vec<&'a str>,
}

impl<'a> SessionDisplay<'a> {
    pub(crate) fn new(session: &'a GameSession, layout: &'a PlayLayout) -> Self {
        Self {
            session,
            layout,
            messages: vec![],
        }
    }

    pub(crate) fn messages(self, messages: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = self.layout;

        stats_display(self.session).render(layout.stats, buf);
        board_display(self.session).render(layout.board, buf);
        if let Some(keypad) = layout.keypad {
            (&KeypadDisplay).render(keypad, buf);
        }

        let messages = self
            .messages
            .iter()
            .map(|text| Line::styled(*text, style::MESSAGE).centered())
            .collect::<Vec<_>>();
        Text::from(messages).render(layout.messages, buf);

        let mut help = vec![];
        for (i, (keys, desc)) in HELP.iter().copied().enumerate() {
            if i > 0 {
                help.push(Span::styled(" | ", Style::new().fg(color::GRAY)));
            }
            help.push(Span::styled(keys, Style::new().fg(color::CYAN)));
            help.push(Span::from(" "));
            help.push(Span::styled(desc, Style::new().fg(color::WHITE)));
        }
        Line::from(help).centered().render(layout.help, buf);

        if self.session.is_game_over() {
            let block = Block::new().style(style::GAME_OVER);
            let inner = block.inner(layout.game_over);
            Clear.render(layout.game_over, buf);
            block.render(layout.game_over, buf);
            let [_, title, score] = Layout::vertical([Constraint::Length(1); 3]).areas(inner);
            Line::styled("GAME OVER!!", style::GAME_OVER)
                .centered()
                .render(title, buf);
            Line::styled(format!("Score: {}", self.session.score()), style::GAME_OVER)
                .centered()
                .render(score, buf);
            Line::styled(RESTART_LABEL, style::BUTTON).render(layout.restart_button, buf);
        }
    }
}
