use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use procfs::net::{TcpNetEntry, TcpState};

use crate::error::SourceError;
use crate::model::ConnectionRecord;

/// Anything that can produce a fresh snapshot of the TCP socket table.
pub trait ConnectionSource: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<ConnectionRecord>, SourceError>;
}

/// Reads `/proc/net/tcp` (and `/proc/net/tcp6` when asked).
#[derive(Debug, Clone, Default)]
pub struct ProcNetSource {
    include_v6: bool,
}

impl ProcNetSource {
    pub fn new(include_v6: bool) -> Self {
        Self { include_v6 }
    }
}

impl ConnectionSource for ProcNetSource {
    fn list(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        let mut records: Vec<ConnectionRecord> = procfs::net::tcp()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?
            .iter()
            .map(|entry| to_record("tcp", entry))
            .collect();

        if self.include_v6 {
            let v6 = procfs::net::tcp6().map_err(|e| SourceError::Unavailable(e.to_string()))?;
            records.extend(v6.iter().map(|entry| to_record("tcp6", entry)));
        }
        Ok(records)
    }
}

fn to_record(protocol: &str, entry: &TcpNetEntry) -> ConnectionRecord {
    let (local_address, local_port) = split_addr(entry.local_address);
    let (remote_address, remote_port) = split_addr(entry.remote_address);
    ConnectionRecord {
        protocol: protocol.to_string(),
        local_address,
        local_port,
        remote_address,
        remote_port,
        state: state_name(&entry.state).to_string(),
    }
}

fn split_addr(addr: SocketAddr) -> (String, u16) {
    (addr.ip().to_string(), addr.port())
}

/// Kernel names for TCP states, as `netstat` prints them.
pub fn state_name(state: &TcpState) -> &'static str {
    #[allow(unreachable_patterns)]
    match state {
        TcpState::Established => "ESTABLISHED",
        TcpState::SynSent => "SYN_SENT",
        TcpState::SynRecv => "SYN_RECV",
        TcpState::FinWait1 => "FIN_WAIT1",
        TcpState::FinWait2 => "FIN_WAIT2",
        TcpState::TimeWait => "TIME_WAIT",
        TcpState::Close => "CLOSE",
        TcpState::CloseWait => "CLOSE_WAIT",
        TcpState::LastAck => "LAST_ACK",
        TcpState::Listen => "LISTEN",
        TcpState::Closing => "CLOSING",
        TcpState::NewSynRecv => "NEW_SYN_RECV",
        _ => "UNKNOWN",
    }
}

/// Runs one query off the event loop, bounded by `timeout`.
///
/// Never fails: on error the snapshot is empty and the cause is returned
/// alongside so the caller can surface it.
///
/// A query that times out is abandoned, not cancelled; its blocking thread
/// runs to completion and the runtime waits for it on shutdown. `/proc`
/// reads do not hang in practice, so exit after a timeout is only delayed
/// by however long that one read takes.
pub async fn poll(
    source: Arc<dyn ConnectionSource>,
    timeout: Duration,
) -> (Vec<ConnectionRecord>, Option<SourceError>) {
    let query = tokio::task::spawn_blocking(move || source.list());
    match tokio::time::timeout(timeout, query).await {
        Ok(Ok(Ok(records))) => (records, None),
        Ok(Ok(Err(e))) => (Vec::new(), Some(e)),
        Ok(Err(join)) => (Vec::new(), Some(SourceError::Worker(join.to_string()))),
        Err(_) => (Vec::new(), Some(SourceError::TimedOut(timeout))),
    }
}
