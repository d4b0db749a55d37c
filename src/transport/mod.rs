//! PULSE transport engine.
//!
//! One engine instance manages exactly one binding/connection pair. It
//! provides:
//!
//! - **Lifecycle**: [`Engine::create`] / [`Engine::close`] with resolve,
//!   bind, and timeout setup
//! - **Endpoint resolution**: [`resolve`] for textual `host:port` specs
//! - **Pacing**: [`DirectionPacer`] admission control per direction
//! - **Packet transport**: one datagram per [`Engine::read`] /
//!   [`Engine::write`] call
//! - **Accounting**: [`TransferLedger`] with monotonic byte counters
//! - **Discovery**: [`Engine::discover_ip`] probe exchange for the
//!   externally visible address
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Caller                    │
//! ├─────────────────────────────────────────┤
//! │               Engine                    │  ← This module
//! │   lifecycle, pacing, ledger, discovery  │
//! ├─────────────────────────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod discovery;
mod engine;
mod ledger;
mod pacing;
pub mod resolve;
mod socket;

pub use discovery::{parse_reflected_addr, reflect};
pub use engine::{Engine, Transfer};
pub use ledger::{LedgerSnapshot, TransferLedger};
pub use pacing::{Admission, DirectionPacer, PacingState};
pub use socket::EngineSocket;
