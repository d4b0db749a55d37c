//! Error types for the PULSE engine.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Transient conditions (pacing refusal, an elapsed receive window) are not
/// errors; they travel through [`Transfer`](crate::transport::Transfer).
/// This enum carries genuine faults only.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The textual address could not be parsed or resolved to an endpoint.
    #[error("address resolution failed for {spec:?}")]
    AddressResolution {
        /// The spec as supplied by the caller.
        spec: String,
    },

    /// Binding the local endpoint failed (port in use, permission denied).
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// The resolved local endpoint we tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        source: io::Error,
    },

    /// A received datagram is larger than the caller's buffer.
    /// Datagrams are never truncated to fit.
    #[error("datagram of {len} bytes exceeds buffer capacity {capacity}")]
    PacketTooLarge {
        /// Size of the datagram on the wire.
        len: usize,
        /// Capacity the caller provided.
        capacity: usize,
    },

    /// I/O error from the underlying socket (e.g. destination unreachable).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    /// Check if this error occurred while constructing an engine.
    ///
    /// Construction failures are fatal for the session: the engine was never
    /// produced and there is nothing to retry against.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            EngineError::AddressResolution { .. } | EngineError::Bind { .. }
        )
    }

    /// Check if this error came from moving a datagram on an established
    /// engine.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EngineError::PacketTooLarge { .. } | EngineError::Io(_)
        )
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_errors() {
        let err = EngineError::AddressResolution {
            spec: "nowhere:0".into(),
        };
        assert!(err.is_construction());
        assert!(!err.is_transport());

        let err = EngineError::Bind {
            addr: "127.0.0.1:9000".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(err.is_construction());
    }

    #[test]
    fn test_transport_errors() {
        let err = EngineError::PacketTooLarge {
            len: 2000,
            capacity: 1500,
        };
        assert!(err.is_transport());
        assert!(!err.is_construction());

        let err = EngineError::Io(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(err.is_transport());
    }

    #[test]
    fn test_display_carries_context() {
        let err = EngineError::PacketTooLarge {
            len: 2000,
            capacity: 1500,
        };
        let msg = err.to_string();
        assert!(msg.contains("2000"));
        assert!(msg.contains("1500"));
    }
}
