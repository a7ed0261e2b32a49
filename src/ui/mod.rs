//! Full-screen UI components.
//!
//! Two sibling controllers share one design: a pure state machine that maps
//! key events to state changes or control signals, a renderer that reads
//! the state and paints a ratatui buffer, and a `run_*` session loop that
//! owns the terminal for its duration. The session loops block on key
//! input; anything asynchronous (loading older history) happens in the
//! caller after the signal is returned and the terminal is restored.

pub mod navigator;
pub mod pager;
pub mod viewport;
pub mod wrap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::DefaultTerminal;

use crate::chat::DialogEntry;

/// Control signal the pager hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerSignal {
    /// User quit the viewer.
    Quit,
    /// User scrolled past the oldest loaded message; the caller should
    /// fetch older history and re-enter with `resume_offset + prepended`.
    LoadOlder { resume_offset: usize },
    /// A slash command entered inside the viewer, to be dispatched by the
    /// outer command loop. Always starts with '/'.
    Command(String),
}

/// Control signal the dialog navigator hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    Quit,
    Back,
    Selected(DialogEntry),
}

/// RAII terminal session: raw mode + alternate screen on creation, restored
/// on drop. Dropping before the caller runs async work is what keeps the
/// fetch from ever executing while the terminal is captured.
pub struct TuiGuard {
    terminal: DefaultTerminal,
}

impl TuiGuard {
    pub fn enter() -> Self {
        Self { terminal: ratatui::init() }
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Write one line of text at `(x, y)` in buffer coordinates, clipped to the
/// buffer area. Out-of-bounds coordinates are silently dropped, overly wide
/// text is truncated at the right edge.
pub(crate) fn put_line(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.top() || y >= area.bottom() || x >= area.right() {
        return;
    }
    let max_width = (area.right() - x) as usize;
    buf.set_stringn(x, y, text, max_width, style);
}
