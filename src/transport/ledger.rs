//! Transfer accounting.
//!
//! Cumulative counters of traffic moved by one engine. Updated exactly once
//! per successful transfer, by the number of bytes the socket reported;
//! failed or refused transfers leave the ledger untouched.

/// Monotonically non-decreasing transfer counters for one engine.
#[derive(Debug, Clone, Default)]
pub struct TransferLedger {
    bytes_sent: u64,
    bytes_received: u64,
    datagrams_sent: u64,
    datagrams_received: u64,
}

impl TransferLedger {
    /// Create a zeroed ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully sent datagram of `bytes` payload bytes.
    pub fn record_sent(&mut self, bytes: u64) {
        self.bytes_sent = self.bytes_sent.saturating_add(bytes);
        self.datagrams_sent = self.datagrams_sent.saturating_add(1);
    }

    /// Record one successfully received datagram of `bytes` payload bytes.
    pub fn record_received(&mut self, bytes: u64) {
        self.bytes_received = self.bytes_received.saturating_add(bytes);
        self.datagrams_received = self.datagrams_received.saturating_add(1);
    }

    /// Cumulative payload bytes sent since creation.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Cumulative payload bytes received since creation.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Cumulative datagrams sent since creation.
    pub fn datagrams_sent(&self) -> u64 {
        self.datagrams_sent
    }

    /// Cumulative datagrams received since creation.
    pub fn datagrams_received(&self) -> u64 {
        self.datagrams_received
    }

    /// Take a point-in-time copy of the counters.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            bytes_sent: self.bytes_sent,
            bytes_received: self.bytes_received,
            datagrams_sent: self.datagrams_sent,
            datagrams_received: self.datagrams_received,
        }
    }
}

/// Point-in-time copy of an engine's counters.
///
/// Returned by [`Engine::close`](crate::transport::Engine::close) so the
/// final totals survive the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// Payload bytes sent.
    pub bytes_sent: u64,
    /// Payload bytes received.
    pub bytes_received: u64,
    /// Datagrams sent.
    pub datagrams_sent: u64,
    /// Datagrams received.
    pub datagrams_received: u64,
}
