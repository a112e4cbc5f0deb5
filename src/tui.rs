//! Terminal setup and teardown.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use crate::error::{AppError, Result};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> Result<Tui> {
    enable_raw_mode().map_err(AppError::RenderInit)?;
    undo_on_failure(setup(), || {
        let _ = restore();
    })
}

fn setup() -> io::Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Any failure after raw mode is on is a render init failure, and the
/// terminal is put back before it is reported.
fn undo_on_failure<T>(step: io::Result<T>, undo: impl FnOnce()) -> Result<T> {
    step.map_err(|e| {
        undo();
        AppError::RenderInit(e)
    })
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Leaves the alternate screen before the default panic message prints.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_failure_is_render_init_and_undone() {
        let mut undone = false;
        let failed: io::Result<()> = Err(io::Error::other("clear failed"));
        let res = undo_on_failure(failed, || undone = true);
        assert!(matches!(res, Err(AppError::RenderInit(_))));
        assert!(undone);
        assert!(res
            .unwrap_err()
            .to_string()
            .starts_with("failed to initialize terminal"));
    }

    #[test]
    fn test_setup_success_is_not_undone() {
        let mut undone = false;
        let res = undo_on_failure(Ok(7), || undone = true);
        assert_eq!(res.unwrap(), 7);
        assert!(!undone);
    }
}
