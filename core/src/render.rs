//! Boundary between the scheduler and whatever draws the dashboard.

use std::io;

use netdiag_common::health::HealthSymbol;
use netdiag_common::target::Target;

/// Column geometry shared by every row of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Width of the widest `"<Kind> <address>"` label.
    pub label_width: usize,
    /// Number of history symbols shown per row.
    pub window: usize,
}

impl Layout {
    /// Fits `label:` padding, one space and the window into `display_width` columns.
    pub fn new(label_width: usize, display_width: usize) -> Self {
        Self {
            label_width,
            window: display_width.saturating_sub(label_width + 2),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Row<'a> {
    pub target: &'a Target,
    /// Most recent symbols, oldest first, at most `Layout::window` of them.
    pub symbols: Vec<HealthSymbol>,
}

/// Read-only snapshot handed to a [`Renderer`].
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub layout: Layout,
    pub rows: Vec<Row<'a>>,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Moves the output back up over `lines` rows so the next frame overwrites this one.
    fn rewind(&mut self, lines: usize) -> io::Result<()>;
}
