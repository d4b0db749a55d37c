//! Endpoint resolution.
//!
//! Turns the textual `host:port` specs the caller supplies into concrete
//! socket addresses. Failures here surface only through engine creation;
//! there is no standalone resolution API on an established engine.

use std::net::SocketAddr;

use tokio::net::lookup_host;

use crate::core::{constants, EngineError, EngineResult};

/// Resolve a `host:port` spec into a socket address.
///
/// A literal address (`"127.0.0.1:9000"`, `"[::1]:9000"`) is parsed without
/// touching the resolver; anything else goes through DNS and the first
/// result wins.
pub async fn resolve(spec: &str) -> EngineResult<SocketAddr> {
    if let Ok(addr) = spec.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = lookup_host(spec)
        .await
        .map_err(|_| EngineError::AddressResolution { spec: spec.into() })?;

    addrs
        .next()
        .ok_or_else(|| EngineError::AddressResolution { spec: spec.into() })
}

/// Resolve the local binding spec, falling back to the wildcard address
/// (OS-chosen interface and port) when the caller supplies none.
pub async fn resolve_binding(spec: Option<&str>) -> EngineResult<SocketAddr> {
    match spec {
        Some(spec) => resolve(spec).await,
        None => Ok(constants::WILDCARD_BINDING
            .parse()
            .expect("wildcard binding is a valid literal")),
    }
}
