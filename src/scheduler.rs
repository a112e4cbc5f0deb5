use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Refreshing,
}

/// Fixed-period refresh clock owned by the event loop.
///
/// Ticks that fall due while a refresh is still running are skipped, never
/// queued up behind it. Once stopped, no further ticks are delivered.
#[derive(Debug)]
pub struct Scheduler {
    interval: Interval,
    phase: Phase,
    stopped: bool,
}

impl Scheduler {
    /// Must be called inside a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            phase: Phase::Idle,
            stopped: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Waits for the next tick and moves to `Refreshing`. Pending forever
    /// once stopped.
    pub async fn tick(&mut self) {
        if self.stopped {
            std::future::pending::<()>().await;
        }
        self.interval.tick().await;
        self.phase = Phase::Refreshing;
    }

    /// Marks the refresh handed to the table.
    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.phase = Phase::Idle;
    }
}
