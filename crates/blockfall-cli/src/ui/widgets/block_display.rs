use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::Widget,
};

use super::style;

/// A single board cell.
#[derive(Debug)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub(crate) const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Filled(kind) => Self::from_kind(kind),
        }
    }

    fn from_kind(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::I => style::I_BLOCK,
            PieceKind::O => style::O_BLOCK,
            PieceKind::S => style::S_BLOCK,
            PieceKind::Z => style::Z_BLOCK,
            PieceKind::J => style::J_BLOCK,
            PieceKind::L => style::L_BLOCK,
            PieceKind::T => style::T_BLOCK,
        };
        Self::new(style, "")
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style);
        if area.is_empty() || self.symbol.is_empty() {
            return;
        }
        let x = area.x + (area.width - 1) / 2;
        buf.set_string(x, area.y, self.symbol, self.style);
    }
}
