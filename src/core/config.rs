//! Engine configuration.
//!
//! All tunables are fixed at creation time; there are no per-call overrides.
//! Earlier revisions of the native surface let callers pass pacing budgets on
//! every call, which made it possible to bypass the policy by lying once.

use std::time::Duration;

use super::constants;

/// Pacing budgets for one engine, applied per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Largest transfer (in bytes) a single admission may cover.
    pub packet_budget: u64,

    /// Minimum time between two admitted transfers in the same direction.
    pub packet_interval: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            packet_budget: constants::DEFAULT_PACKET_BUDGET,
            packet_interval: constants::DEFAULT_PACKET_INTERVAL,
        }
    }
}

impl PacingConfig {
    /// Set the per-admission byte budget.
    pub fn with_packet_budget(mut self, budget: u64) -> Self {
        self.packet_budget = budget;
        self
    }

    /// Set the minimum interval between admitted transfers.
    pub fn with_packet_interval(mut self, interval: Duration) -> Self {
        self.packet_interval = interval;
        self
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on how long a single receive (read, discovery) may block.
    pub socket_timeout: Duration,

    /// Pacing budgets, shared by both directions.
    pub pacing: PacingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            socket_timeout: constants::DEFAULT_SOCKET_TIMEOUT,
            pacing: PacingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the socket timeout.
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// Set the pacing budgets.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }
}
