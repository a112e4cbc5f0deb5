//! Event loop: one refresh per tick, key presses applied between refreshes.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::Result;
use crate::model::FilterMode;
use crate::network::{self, ConnectionSource};
use crate::scheduler::{Phase, Scheduler};
use crate::table::TableModel;
use crate::tui::Tui;
use crate::{filter, format, input};

const KEY_POLL: Duration = Duration::from_millis(50);

pub struct App {
    config: Config,
    source: Arc<dyn ConnectionSource>,
    mode: FilterMode,
    table: TableModel,
    /// Data rows in the current snapshot, fillers excluded.
    matched: usize,
    /// Set while the last poll failed.
    source_error: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn ConnectionSource>) -> Self {
        Self {
            mode: config.initial_mode,
            config,
            source,
            table: TableModel::new(),
            matched: 0,
            source_error: None,
            should_quit: false,
        }
    }

    #[cfg(test)]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    #[cfg(test)]
    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let (key_tx, mut key_rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || read_keys(key_tx));
        self.run_with(terminal, &mut key_rx).await
    }

    /// Drives the loop from any backend and any event feed until quit.
    pub async fn run_with<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut mpsc::UnboundedReceiver<io::Result<Event>>,
    ) -> Result<()> {
        let mut scheduler = Scheduler::new(self.config.tick);
        while !self.should_quit() {
            tokio::select! {
                _ = scheduler.tick(), if scheduler.is_running() => {
                    debug_assert_eq!(scheduler.phase(), Phase::Refreshing);
                    self.refresh().await;
                    scheduler.finish();
                }
                Some(event) = events.recv() => match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                },
                Ok(()) = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                scheduler.stop();
                break;
            }
            terminal.draw(|frame| self.draw(frame))?;
        }
        Ok(())
    }

    /// list → filter → format → pad → display, in that order, start to end.
    pub async fn refresh(&mut self) {
        let (records, err) =
            network::poll(Arc::clone(&self.source), self.config.source_timeout).await;

        match (&err, &self.source_error) {
            (Some(e), None) => tracing::warn!("Connection source failed: {}", e),
            (None, Some(_)) => tracing::info!("Connection source recovered"),
            _ => {}
        }
        self.source_error = err.map(|e| e.to_string());

        let rows: Vec<_> = filter::apply(records, self.mode).iter().map(format::format).collect();
        self.matched = rows.len();
        self.table.set_rows(format::pad_to(rows, self.config.min_rows));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let outcome = input::handle(&key);
        if let Some(mode) = outcome.mode {
            if mode != self.mode {
                tracing::info!("Filter mode: {} -> {}", self.mode, mode);
            }
            self.mode = mode;
        }
        if outcome.toggle_focus {
            let focused = self.table.toggle_focus();
            tracing::debug!(focused, "Table focus toggled");
        }
        if outcome.quit {
            tracing::info!("Quit requested");
            self.should_quit = true;
        }
        if outcome.forward {
            self.table.handle_key(key);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.size());

        let title = format!(" TCP · {} ({}) ", self.mode, self.matched);
        self.table.draw(frame, chunks[0], &title);

        let mut spans = vec![Span::styled(
            " 1 listen  2 established  3 any  esc focus  q quit",
            Style::default().fg(Color::DarkGray),
        )];
        if self.source_error.is_some() {
            spans.push(Span::styled("  [source unavailable]", Style::default().fg(Color::Red)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
    }
}

/// Forwards terminal events until the receiving side goes away.
fn read_keys(tx: mpsc::UnboundedSender<io::Result<Event>>) {
    while !tx.is_closed() {
        match event::poll(KEY_POLL) {
            Ok(false) => continue,
            Ok(true) => {
                if tx.send(event::read()).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}
