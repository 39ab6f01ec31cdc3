use std::io::{self, Write};

use colored::*;
use crossterm::{cursor, queue};
use netdiag_common::health::HealthSymbol;
use netdiag_core::render::{Frame, Layout, Renderer, Row};
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

/// Draws frames as one line per target and moves back up over them after each tick.
pub struct Dashboard<W: Write> {
    out: W,
}

impl<W: Write> Dashboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for Dashboard<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        for row in &frame.rows {
            writeln!(self.out, "{}", format_row(row, frame.layout))?;
        }
        self.out.flush()
    }

    fn rewind(&mut self, lines: usize) -> io::Result<()> {
        // MoveUp(0) still moves one line on most terminals.
        if lines == 0 {
            return Ok(());
        }
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        queue!(self.out, cursor::MoveUp(lines))?;
        self.out.flush()
    }
}

/// `"<Kind> <address>:"`, padded to the common label width, a space, then the symbols.
pub fn format_row(row: &Row<'_>, layout: Layout) -> String {
    let label = row.target.label();
    let padding = layout
        .label_width
        .saturating_sub(UnicodeWidthStr::width(label.as_str()));
    let symbols: String = row
        .symbols
        .iter()
        .map(|symbol| paint(*symbol).to_string())
        .collect();

    format!("{label}:{} {symbols}", " ".repeat(padding))
}

fn paint(symbol: HealthSymbol) -> ColoredString {
    let glyph = symbol.glyph().to_string();
    match symbol {
        HealthSymbol::Success => glyph.color(colors::SUCCESS).bold(),
        HealthSymbol::Failure | HealthSymbol::Unknown => glyph.color(colors::FAILURE).bold(),
        HealthSymbol::Pending => glyph.dimmed(),
    }
}
