// src/model.rs
use std::fmt;

/// One row of the kernel's TCP socket table, as read during a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub protocol: String,
    pub local_address: String,
    pub local_port: u16,
    pub remote_address: String,
    pub remote_port: u16,
    /// Kernel vocabulary, e.g. `LISTEN`, `ESTABLISHED`, `TIME_WAIT`.
    pub state: String,
}

/// Which connection state is visible in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FilterMode {
    #[default]
    Listen,
    Established,
    Any,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Listen => "LISTEN",
            FilterMode::Established => "ESTABLISHED",
            FilterMode::Any => "ANY",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol, local endpoint, remote endpoint, state.
pub type DisplayRow = [String; 4];
