//! Dialog list navigator.
//!
//! Simpler sibling of the pager: a fixed list of dialog entries, one
//! highlighted row, offset-based scrolling that keeps the selection in
//! view, and a proportional scrollbar column when the list overflows.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::debug;

use crate::chat::DialogEntry;

use super::{put_line, viewport, NavSignal, TuiGuard};

/// Header, separator and two footer rows, as in the pager.
const RESERVED_ROWS: u16 = 4;

/// Navigator controller state: selection index plus scroll offset.
#[derive(Debug)]
pub struct NavigatorState {
    len: usize,
    visible_rows: usize,
    selected: usize,
    offset: usize,
}

impl NavigatorState {
    pub fn new(len: usize, visible_rows: usize) -> Self {
        Self { len, visible_rows: visible_rows.max(1), selected: 0, offset: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn resize(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.scroll_to_selection();
    }

    /// Apply one key event; `Some(signal)` hands control back to the caller.
    /// The returned `Selected` carries the index; the session loop resolves
    /// it to the entry.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<NavAction> {
        if !matches!(key.kind, KeyEventKind::Press) {
            return None;
        }
        match key.code {
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.scroll_to_selection();
                }
            }
            KeyCode::Down => {
                if self.len > 0 && self.selected < self.len - 1 {
                    self.selected += 1;
                    self.scroll_to_selection();
                }
            }
            KeyCode::Enter => {
                if self.len > 0 {
                    return Some(NavAction::Select(self.selected));
                }
            }
            KeyCode::Char('[') => return Some(NavAction::Back),
            KeyCode::Char('q') => return Some(NavAction::Quit),
            _ => {}
        }
        None
    }

    /// Shift the window so the highlighted row stays inside
    /// `[offset, offset + visible_rows)`.
    fn scroll_to_selection(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.visible_rows {
            self.offset = self.selected + 1 - self.visible_rows;
        }
    }
}

/// Key outcome before the entry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Quit,
    Back,
    Select(usize),
}

pub fn render(state: &NavigatorState, dialogs: &[DialogEntry], area: Rect, buf: &mut Buffer) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let header = "Chats (\u{2191}/\u{2193} to navigate, Enter to select, [ to go back, q to quit)";
    put_line(buf, area, 0, area.top(), header, Style::default().add_modifier(Modifier::BOLD));
    if area.height > 1 {
        let rule = "=".repeat(header.chars().count().min(area.width as usize));
        put_line(buf, area, 0, area.top() + 1, &rule, Style::default());
    }

    let top = area.top() + 2;
    let range = viewport::visible_range(state.offset, state.visible_rows, dialogs.len());
    for (row, idx) in range.enumerate() {
        let dialog = &dialogs[idx];
        let mut line = format!("{}. {}", idx + 1, dialog.name);
        if dialog.unread_count > 0 {
            line.push_str(&format!(" [{}]", dialog.unread_count));
        }
        let style = if idx == state.selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        put_line(buf, area, 0, top + row as u16, &line, style);
    }

    // Proportional scrollbar in the last column when the list overflows.
    if dialogs.len() > state.visible_rows && area.width >= 2 {
        let bar_height =
            ((state.visible_rows * state.visible_rows) / dialogs.len()).max(1);
        let bar_top = (state.offset * state.visible_rows) / dialogs.len();
        let x = area.right() - 1;
        for row in 0..state.visible_rows {
            let glyph = if row >= bar_top && row < bar_top + bar_height { "\u{2588}" } else { "\u{2502}" };
            put_line(buf, area, x, top + row as u16, glyph, Style::default());
        }
    }
}

/// Run one navigation session over `dialogs`. The terminal is restored
/// before the signal is returned.
pub fn run_navigator(dialogs: &[DialogEntry]) -> Result<NavSignal> {
    let mut guard = TuiGuard::enter();
    let size = guard.terminal().size()?;
    let mut state =
        NavigatorState::new(dialogs.len(), viewport::visible_rows(size.height, RESERVED_ROWS));
    debug!(dialogs = dialogs.len(), "entering navigator session");

    loop {
        guard.terminal().draw(|frame| {
            let area = frame.area();
            state.resize(viewport::visible_rows(area.height, RESERVED_ROWS));
            render(&state, dialogs, area, frame.buffer_mut());
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match state.handle_key(key) {
                Some(NavAction::Quit) => return Ok(NavSignal::Quit),
                Some(NavAction::Back) => return Ok(NavSignal::Back),
                Some(NavAction::Select(idx)) => {
                    return Ok(NavSignal::Selected(dialogs[idx].clone()));
                }
                None => {}
            },
            Event::Resize(..) => {}
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entries(n: usize) -> Vec<DialogEntry> {
        (0..n)
            .map(|i| DialogEntry {
                id: i as i64 + 1,
                name: format!("chat {}", i + 1),
                unread_count: if i % 2 == 0 { i as u32 } else { 0 },
            })
            .collect()
    }

    #[test]
    fn test_selection_scrolls_offset_down() {
        // 3 entries, 2 visible: down, down keeps the selection in view.
        let mut state = NavigatorState::new(3, 2);
        state.handle_key(key(KeyCode::Down));
        assert_eq!((state.selected(), state.offset()), (1, 0));
        state.handle_key(key(KeyCode::Down));
        assert_eq!((state.selected(), state.offset()), (2, 1));
    }

    #[test]
    fn test_selection_clamped_at_ends() {
        let mut state = NavigatorState::new(3, 2);
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.selected(), 0);
        for _ in 0..10 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn test_scrolling_back_up_follows_selection() {
        let mut state = NavigatorState::new(10, 3);
        for _ in 0..9 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!((state.selected(), state.offset()), (9, 7));
        for _ in 0..9 {
            state.handle_key(key(KeyCode::Up));
        }
        assert_eq!((state.selected(), state.offset()), (0, 0));
    }

    #[test]
    fn test_enter_back_quit() {
        let mut state = NavigatorState::new(3, 2);
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), Some(NavAction::Select(1)));
        assert_eq!(state.handle_key(key(KeyCode::Char('['))), Some(NavAction::Back));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Some(NavAction::Quit));
    }

    #[test]
    fn test_enter_on_empty_list_is_ignored() {
        let mut state = NavigatorState::new(0, 5);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(state.handle_key(key(KeyCode::Down)), None);
    }

    #[test]
    fn test_resize_keeps_selection_visible() {
        let mut state = NavigatorState::new(10, 5);
        for _ in 0..7 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!((state.selected(), state.offset()), (7, 3));
        state.resize(2);
        assert!(state.selected() >= state.offset());
        assert!(state.selected() < state.offset() + 2);
    }

    fn buffer_row(buf: &Buffer, y: u16) -> String {
        let area = buf.area();
        (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_render_highlights_selection_and_shows_unread() {
        let dialogs = entries(3);
        let area = Rect::new(0, 0, 40, 8);
        let mut state = NavigatorState::new(3, 4);
        state.handle_key(key(KeyCode::Down));
        let mut buf = Buffer::empty(area);
        render(&state, &dialogs, area, &mut buf);

        assert!(buffer_row(&buf, 0).contains("Chats"));
        assert!(buffer_row(&buf, 2).contains("1. chat 1"));
        assert!(buffer_row(&buf, 3).contains("2. chat 2"));
        // Unread count rendered for entries that have one.
        assert!(buffer_row(&buf, 4).contains("3. chat 3 [2]"));
        // Selection is rendered reversed.
        let cell = &buf[(0u16, 3u16)];
        assert!(cell.style().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_scrollbar_present_only_on_overflow() {
        let area = Rect::new(0, 0, 30, 8);

        let few = entries(3);
        let mut buf = Buffer::empty(area);
        render(&NavigatorState::new(3, 4), &few, area, &mut buf);
        let bar: String = (2..6).map(|y| buf[(29u16, y as u16)].symbol().to_string()).collect();
        assert!(!bar.contains('\u{2588}') && !bar.contains('\u{2502}'));

        let many = entries(20);
        let mut buf = Buffer::empty(area);
        render(&NavigatorState::new(20, 4), &many, area, &mut buf);
        let bar: String = (2..6).map(|y| buf[(29u16, y as u16)].symbol().to_string()).collect();
        assert!(bar.contains('\u{2588}'));
        assert!(bar.contains('\u{2502}'));
    }
}
