use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{AppError, Result};
use crate::format::DEFAULT_MIN_ROWS;
use crate::model::FilterMode;

/// Largest accepted padding floor.
pub const MAX_MIN_ROWS: usize = 10_000;

/// tcpwatch: live view of the host's TCP connection table
#[derive(Parser, Debug)]
#[command(name = "tcpwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection state shown at startup
    #[arg(short, long, value_enum, default_value_t = FilterMode::Listen)]
    pub mode: FilterMode,

    /// Refresh period in milliseconds
    #[arg(short, long, default_value_t = 5)]
    pub interval_ms: u64,

    /// Upper bound on one socket table query, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub timeout_ms: u64,

    /// Minimum number of rows the table is padded to
    #[arg(long, default_value_t = DEFAULT_MIN_ROWS)]
    pub min_rows: usize,

    /// Also list IPv6 sockets
    #[arg(long)]
    pub ipv6: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/tcpwatch.log")]
    pub log_file: PathBuf,
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub initial_mode: FilterMode,
    pub tick: Duration,
    pub source_timeout: Duration,
    pub min_rows: usize,
    pub include_v6: bool,
}

impl TryFrom<&Cli> for Config {
    type Error = AppError;

    fn try_from(cli: &Cli) -> Result<Self> {
        if cli.interval_ms == 0 {
            return Err(AppError::Config("--interval-ms must be greater than 0".into()));
        }
        if cli.timeout_ms == 0 {
            return Err(AppError::Config("--timeout-ms must be greater than 0".into()));
        }
        if cli.min_rows > MAX_MIN_ROWS {
            return Err(AppError::Config(format!("--min-rows must be at most {MAX_MIN_ROWS}")));
        }
        Ok(Self {
            initial_mode: cli.mode,
            tick: Duration::from_millis(cli.interval_ms),
            source_timeout: Duration::from_millis(cli.timeout_ms),
            min_rows: cli.min_rows,
            include_v6: cli.ipv6,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_mode: FilterMode::Listen,
            tick: Duration::from_millis(5),
            source_timeout: Duration::from_millis(100),
            min_rows: DEFAULT_MIN_ROWS,
            include_v6: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tcpwatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_reference() {
        let config = Config::try_from(&parse(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_rows, 26);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--mode", "any", "-i", "250", "--min-rows", "10", "--ipv6"]);
        let config = Config::try_from(&cli).unwrap();
        assert_eq!(config.initial_mode, FilterMode::Any);
        assert_eq!(config.tick, Duration::from_millis(250));
        assert_eq!(config.min_rows, 10);
        assert!(config.include_v6);
    }

    #[test]
    fn test_zero_durations_rejected() {
        assert!(matches!(Config::try_from(&parse(&["-i", "0"])), Err(AppError::Config(_))));
        assert!(matches!(
            Config::try_from(&parse(&["--timeout-ms", "0"])),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_min_rows_ceiling() {
        let cli = parse(&["--min-rows", "10000"]);
        assert_eq!(Config::try_from(&cli).unwrap().min_rows, MAX_MIN_ROWS);

        for huge in ["10001", "18446744073709551615"] {
            let err = Config::try_from(&parse(&["--min-rows", huge])).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(!err.to_string().contains('\n'));
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["tcpwatch", "--mode", "closed"]).is_err());
    }
}
