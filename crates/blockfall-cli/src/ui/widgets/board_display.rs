use std::iter;

use blockfall_engine::{ActivePiece, Board};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::BlockDisplay;

/// The board with the active piece drawn on top.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<&'a ActivePiece>,
    block_size: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(board: &'a Board, block_size: u16) -> Self {
        Self {
            board,
            active_piece: None,
            block_size,
            block: None,
        }
    }

    pub(crate) fn active_piece(self, piece: Option<&'a ActivePiece>) -> Self {
        Self {
            active_piece: piece,
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        cells(self.board.width()) * self.block_size
            + super::block_margin(self.block.as_ref()).0
    }

    pub(crate) fn height(&self) -> u16 {
        cells(self.board.height()) + super::block_margin(self.block.as_ref()).1
    }
}

fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = self.active_piece {
            board.commit_piece(piece);
        }

        for (y, row) in iter::zip(area.top().., board.rows()) {
            for (i, cell) in iter::zip(0.., row) {
                let x = area.left().saturating_add(i * self.block_size);
                let cell_area = Rect::new(x, y, self.block_size, 1).intersection(area);
                if cell_area.is_empty() {
                    continue;
                }
                BlockDisplay::from_cell(*cell).render(cell_area, buf);
            }
        }
    }
}
