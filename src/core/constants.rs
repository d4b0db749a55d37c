//! Engine-wide constants and defaults.

use std::time::Duration;

/// Largest payload a single UDP datagram can carry
/// (64 KiB minus IP and UDP headers).
pub const MAX_DATAGRAM_PAYLOAD: usize = 65_507;

/// Size of the internal receive staging buffer.
pub const RECV_BUFFER_SIZE: usize = 65_535;

/// Socket timeout applied when the caller does not configure one.
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_secs(1);

/// Default per-admission byte budget: any datagram-sized transfer is
/// admissible.
pub const DEFAULT_PACKET_BUDGET: u64 = MAX_DATAGRAM_PAYLOAD as u64;

/// Default pacing interval: no enforced spacing between transfers.
pub const DEFAULT_PACKET_INTERVAL: Duration = Duration::ZERO;

/// Binding used when the caller supplies no local address; the OS picks
/// the interface and an ephemeral port.
pub const WILDCARD_BINDING: &str = "0.0.0.0:0";
