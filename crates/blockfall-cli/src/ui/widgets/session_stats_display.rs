use std::iter;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub(crate) struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub(crate) fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        20 + super::block_margin(self.block.as_ref()).0
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(STAT_LINES).unwrap_or(u16::MAX)
            + super::block_margin(self.block.as_ref()).1
    }
}

const STAT_LINES: usize = 11;

/// Label and value per line; `None` is a blank separator.
fn stat_lines(session: &GameSession) -> [Option<(&'static str, String)>; STAT_LINES] {
    let progression = session.progression();
    let clears = |rows: usize| progression.line_cleared_counter()[rows].to_string();
    [
        Some(("SCORE:", session.score().to_string())),
        Some(("LEVEL:", session.level().to_string())),
        Some((
            "SPEED:",
            format!("{}ms", session.drop_interval().as_millis()),
        )),
        None,
        Some(("LINES:", progression.total_cleared_lines().to_string())),
        Some(("PIECES:", progression.completed_pieces().to_string())),
        None,
        Some(("SINGLES:", clears(1))),
        Some(("DOUBLES:", clears(2))),
        Some(("TRIPLES:", clears(3))),
        Some(("QUADS:", clears(4))),
    ]
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let line_areas = Layout::vertical([Constraint::Length(1); STAT_LINES]).split(area);
        for (stat, line_area) in iter::zip(stat_lines(self.session), line_areas.iter()) {
            let Some((label, value)) = stat else {
                continue;
            };
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(*line_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(*line_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, PieceSeed};

    use super::*;

    #[test]
    fn test_render_stats() {
        let session =
            GameSession::with_seed(GameConfig::default(), PieceSeed::from_bytes([0; 16])).unwrap();
        let display = SessionStatsDisplay::new(&session).block(BlockWidget::bordered());
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let line = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect()
        };
        assert_eq!(line(1), "│SCORE:             0│");
        assert_eq!(line(3), "│SPEED:        1000ms│");
        assert_eq!(line(4), "│                    │");
    }
}
