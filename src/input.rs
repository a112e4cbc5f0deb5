use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::FilterMode;

/// What a single key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    pub mode: Option<FilterMode>,
    pub toggle_focus: bool,
    pub quit: bool,
    /// Unrecognized here; hand it to the table for navigation.
    pub forward: bool,
}

pub fn handle(key: &KeyEvent) -> InputOutcome {
    let mut out = InputOutcome::default();
    match key.code {
        KeyCode::Char('1') => out.mode = Some(FilterMode::Listen),
        KeyCode::Char('2') => out.mode = Some(FilterMode::Established),
        KeyCode::Char('3') => out.mode = Some(FilterMode::Any),
        KeyCode::Esc => out.toggle_focus = true,
        KeyCode::Char('q') if !has_command_modifier(key) => out.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => out.quit = true,
        _ => out.forward = true,
    }
    out
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
