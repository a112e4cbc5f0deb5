use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

use crate::model::DisplayRow;

pub const COLUMNS: [(&str, u16); 4] = [("Proto", 10), ("Local", 25), ("Remote", 25), ("State", 25)];

const ACCENT: Color = Color::Rgb(0xCE, 0x6B, 0x66);
const SELECTED_BG: Color = Color::Rgb(0x72, 0xEA, 0xEA);
const PAGE: usize = 10;

/// Rows currently on screen plus cursor and focus.
///
/// The row sequence is only ever swapped as a whole, so a draw sees either
/// the previous snapshot or the next one.
#[derive(Debug)]
pub struct TableModel {
    rows: Vec<DisplayRow>,
    focused: bool,
    state: TableState,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TableModel {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            focused: true,
            state: TableState::default().with_selected(Some(0)),
        }
    }

    pub fn set_rows(&mut self, rows: Vec<DisplayRow>) {
        self.rows = rows;
        self.clamp_cursor();
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn toggle_focus(&mut self) -> bool {
        if self.focused {
            self.blur();
        } else {
            self.focus();
        }
        self.focused
    }

    /// Cursor movement. Keys are ignored while blurred.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.focused || self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        let cur = self.cursor();
        let next = match key.code {
            KeyCode::Up | KeyCode::Char('k') => cur.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (cur + 1).min(last),
            KeyCode::PageUp | KeyCode::Char('b') => cur.saturating_sub(PAGE),
            KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => (cur + PAGE).min(last),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => last,
            _ => return,
        };
        self.state.select(Some(next));
    }

    fn clamp_cursor(&mut self) {
        let cur = self.cursor();
        let clamped = cur.min(self.rows.len().saturating_sub(1));
        if clamped != cur {
            self.state.select(Some(clamped));
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        let header = Row::new(COLUMNS.iter().map(|(name, _)| *name))
            .style(header_style())
            .bottom_margin(1);
        let widths = COLUMNS.iter().map(|(_, w)| Constraint::Length(*w));
        let rows = self.rows.iter().map(|r| Row::new(r.iter().map(String::as_str)));

        let highlight = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(SELECTED_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ACCENT)),
            )
            .highlight_style(highlight);

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

fn header_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::filler_row;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn model_with(n: usize) -> TableModel {
        let mut model = TableModel::new();
        model.set_rows(vec![filler_row(); n]);
        model
    }

    #[test]
    fn test_set_rows_replaces_everything() {
        let mut model = model_with(30);
        model.set_rows(vec![filler_row(); 3]);
        assert_eq!(model.rows().len(), 3);
    }

    #[test]
    fn test_cursor_clamped_when_rows_shrink() {
        let mut model = model_with(30);
        model.handle_key(key(KeyCode::End));
        assert_eq!(model.cursor(), 29);
        model.set_rows(vec![filler_row(); 5]);
        assert_eq!(model.cursor(), 4);
    }

    #[test]
    fn test_navigation() {
        let mut model = model_with(30);
        model.handle_key(key(KeyCode::Down));
        model.handle_key(key(KeyCode::Char('j')));
        assert_eq!(model.cursor(), 2);
        model.handle_key(key(KeyCode::Up));
        assert_eq!(model.cursor(), 1);
        model.handle_key(key(KeyCode::PageDown));
        assert_eq!(model.cursor(), 11);
        model.handle_key(key(KeyCode::Home));
        assert_eq!(model.cursor(), 0);
        model.handle_key(key(KeyCode::Up));
        assert_eq!(model.cursor(), 0);
        model.handle_key(key(KeyCode::Char('G')));
        assert_eq!(model.cursor(), 29);
        model.handle_key(key(KeyCode::Down));
        assert_eq!(model.cursor(), 29);
    }

    #[test]
    fn test_blurred_table_ignores_navigation() {
        let mut model = model_with(30);
        model.blur();
        model.handle_key(key(KeyCode::Down));
        assert_eq!(model.cursor(), 0);
        model.focus();
        model.handle_key(key(KeyCode::Down));
        assert_eq!(model.cursor(), 1);
    }

    #[test]
    fn test_toggle_focus() {
        let mut model = TableModel::new();
        assert!(model.is_focused());
        assert!(!model.toggle_focus());
        assert!(model.toggle_focus());
    }

    #[test]
    fn test_header_is_underlined_in_accent() {
        let mut model = model_with(3);
        let mut terminal = Terminal::new(TestBackend::new(90, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                model.draw(frame, area, " t ");
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let x = (0..90)
            .find(|&x| buffer.get(x, 1).symbol() == "P")
            .expect("header row");
        let cell = buffer.get(x, 1);
        assert_eq!(cell.fg, ACCENT);
        assert!(cell.modifier.contains(Modifier::UNDERLINED | Modifier::BOLD));
    }
}
