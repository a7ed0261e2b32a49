//! Scrollable message viewer.
//!
//! The pager owns the terminal while the user reads a conversation. State
//! transitions are pure ([`PagerState::handle_key`] never touches the
//! terminal) so the scroll/command behaviour is tested headless; the
//! renderer reads the state and paints one full frame per change.
//!
//! Scroll model: the message list is ascending by id and the window
//! `[offset, offset + visible_rows)` is drawn bottom-up, newest line at the
//! bottom of the content area. Up-arrow moves the window toward older
//! messages; at offset 0 the oldest loaded message is already on screen,
//! so up emits [`PagerSignal::LoadOlder`] instead and the caller fetches
//! more history with the terminal released.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::debug;

use crate::chat::MessageList;

use super::{put_line, viewport, wrap, PagerSignal, TuiGuard};

/// Header, separator, blank footer and command-entry rows.
const RESERVED_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Viewing,
    CommandEntry,
}

/// Pager controller state. Exists for one viewing session; a load-older
/// round trip tears it down and rebuilds it with a resume offset.
#[derive(Debug)]
pub struct PagerState {
    content_len: usize,
    visible_rows: usize,
    offset: usize,
    mode: Mode,
    command_buffer: String,
}

impl PagerState {
    /// `resume_offset` carries the scroll position across a load-older
    /// round trip; without one the newest window is shown.
    pub fn new(content_len: usize, visible_rows: usize, resume_offset: Option<usize>) -> Self {
        let max = viewport::max_offset(content_len, visible_rows);
        let offset = match resume_offset {
            Some(resume) => resume.min(max),
            None => max,
        };
        Self {
            content_len,
            visible_rows,
            offset,
            mode: Mode::Viewing,
            command_buffer: String::new(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_command_entry(&self) -> bool {
        self.mode == Mode::CommandEntry
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    /// Adopt a new content-area height (terminal resize), keeping the
    /// offset legal.
    pub fn resize(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.offset = self.offset.min(viewport::max_offset(self.content_len, self.visible_rows));
    }

    /// Apply one key event. Returns a signal when control goes back to the
    /// caller; `None` means the state changed (or the key was ignored) and
    /// the session keeps running.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PagerSignal> {
        if !matches!(key.kind, KeyEventKind::Press) {
            return None;
        }
        match self.mode {
            Mode::CommandEntry => self.handle_command_key(key.code),
            Mode::Viewing => self.handle_viewing_key(key.code),
        }
    }

    fn handle_viewing_key(&mut self, code: KeyCode) -> Option<PagerSignal> {
        match code {
            KeyCode::Up => {
                if self.offset > 0 {
                    self.offset -= 1;
                } else {
                    // Oldest loaded message is on screen; ask for history.
                    return Some(PagerSignal::LoadOlder { resume_offset: self.offset });
                }
            }
            KeyCode::Down => {
                let max = viewport::max_offset(self.content_len, self.visible_rows);
                if self.offset < max {
                    self.offset += 1;
                }
            }
            // Jump to the newest window / the oldest loaded window.
            KeyCode::Char('o') => self.offset = 0,
            KeyCode::Char('n') => {
                self.offset = viewport::max_offset(self.content_len, self.visible_rows)
            }
            KeyCode::Char('/') => {
                self.mode = Mode::CommandEntry;
                self.command_buffer = "/".to_string();
            }
            KeyCode::Char('q') => return Some(PagerSignal::Quit),
            _ => {} // unrecognized keys are ignored
        }
        None
    }

    fn handle_command_key(&mut self, code: KeyCode) -> Option<PagerSignal> {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Viewing;
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = std::mem::take(&mut self.command_buffer);
                self.mode = Mode::Viewing;
                if !cmd.is_empty() {
                    return Some(PagerSignal::Command(cmd));
                }
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            // Arrows abandon command entry without scrolling.
            KeyCode::Up | KeyCode::Down => {
                self.mode = Mode::Viewing;
                self.command_buffer.clear();
            }
            KeyCode::Char(c) => self.command_buffer.push(c),
            _ => {}
        }
        None
    }
}

/// Paint one frame: header, separator, visible messages laid out bottom-up
/// (newest at the bottom, partially fitting messages truncated from the
/// top), and the command buffer on the last row while it is being edited.
pub fn render(state: &PagerState, list: &MessageList, title: &str, area: Rect, buf: &mut Buffer) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let header = format!("Messages (\u{2191}/\u{2193} to scroll, / for commands, q to exit) - {title}");
    put_line(buf, area, 0, area.top(), &header, Style::default().add_modifier(Modifier::BOLD));
    if area.height > 1 {
        let rule = "=".repeat(area.width as usize);
        put_line(buf, area, 0, area.top() + 1, &rule, Style::default());
    }

    // Content area: everything between the separator and the command row.
    let content_top = area.top() + 2;
    let content_bottom = area.bottom().saturating_sub(2); // exclusive
    if content_bottom > content_top {
        let width = area.width as usize;
        let range = viewport::visible_range(state.offset, state.visible_rows, list.len());
        let mut y = content_bottom - 1;
        'messages: for msg in list.as_slice()[range].iter().rev() {
            let line = msg.display_line();
            let physical: Vec<&str> = wrap::wrap_line(&line, width).collect();
            for piece in physical.iter().rev() {
                put_line(buf, area, 0, y, piece, Style::default());
                if y == content_top {
                    break 'messages;
                }
                y -= 1;
            }
        }
    }

    if state.is_command_entry() {
        put_line(
            buf,
            area,
            0,
            area.bottom() - 1,
            state.command_buffer(),
            Style::default(),
        );
    }
}

/// Run one viewing session over `list`. Blocks on key input until the user
/// quits, enters a command, or scrolls past the oldest loaded message; the
/// terminal is fully restored before the signal is returned.
pub fn run_pager(
    list: &MessageList,
    title: &str,
    resume_offset: Option<usize>,
) -> Result<PagerSignal> {
    let mut guard = TuiGuard::enter();
    let size = guard.terminal().size()?;
    let mut state = PagerState::new(
        list.len(),
        viewport::visible_rows(size.height, RESERVED_ROWS),
        resume_offset,
    );
    debug!(len = list.len(), offset = state.offset(), "entering pager session");

    loop {
        guard.terminal().draw(|frame| {
            let area = frame.area();
            state.resize(viewport::visible_rows(area.height, RESERVED_ROWS));
            render(&state, list, title, area, frame.buffer_mut());
            if state.is_command_entry() {
                let max_x = (area.width as usize).saturating_sub(1);
                let x = state.command_buffer().chars().count().min(max_x);
                frame.set_cursor_position((x as u16, area.bottom().saturating_sub(1)));
            }
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => {
                if let Some(signal) = state.handle_key(key) {
                    debug!(?signal, "pager session returning");
                    return Ok(signal);
                }
            }
            Event::Resize(..) => {} // geometry is recomputed on the next draw
            _ => {}
        }
    }
}
