//! # PULSE
//!
//! **P**aced **U**DP **L**ink **S**ession **E**ngine
//!
//! PULSE is a point-to-point datagram transport for sessions that need their
//! throughput shaped at the endpoint rather than by the caller's loop speed.
//! It provides:
//!
//! - **One session per engine**: a bound socket paired with a fixed remote
//!   endpoint, exclusively owned
//! - **Pacing**: per-direction admission control with byte budgets and
//!   spacing intervals, fixed at creation
//! - **Accounting**: monotonic 64-bit counters of bytes and datagrams moved
//! - **Discovery**: a probe exchange revealing the externally visible
//!   address of the local endpoint (NAT traversal support)
//! - **Bounded blocking**: every socket-touching call resolves within the
//!   configured timeout
//!
//! ## Modules
//!
//! - [`core`]: configuration, constants, and error types
//! - [`transport`]: the engine and its components
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use pulse_transport::prelude::*;
//!
//! # async fn run() -> EngineResult<()> {
//! let config = EngineConfig::default()
//!     .with_socket_timeout(Duration::from_millis(500))
//!     .with_pacing(
//!         PacingConfig::default()
//!             .with_packet_budget(1500)
//!             .with_packet_interval(Duration::from_millis(20)),
//!     );
//!
//! let mut engine = Engine::create(None, "203.0.113.7:9000", config).await?;
//!
//! match engine.write(b"PING").await? {
//!     Transfer::Complete(n) => assert_eq!(engine.bytes_sent(), n as u64),
//!     Transfer::NotReady => { /* pacing refused, poll again later */ }
//!     Transfer::TimedOut => { /* socket timeout elapsed */ }
//! }
//!
//! let totals = engine.close();
//! assert_eq!(totals.bytes_sent, 4);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{EngineConfig, EngineError, EngineResult, PacingConfig};
    pub use crate::transport::{
        Admission, DirectionPacer, Engine, EngineSocket, LedgerSnapshot, PacingState, Transfer,
        TransferLedger,
    };
}

// Re-export commonly used items at crate root
pub use crate::core::{EngineConfig, EngineError, EngineResult, PacingConfig};
pub use transport::{Engine, LedgerSnapshot, Transfer, TransferLedger};
