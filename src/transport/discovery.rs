//! External address discovery.
//!
//! A NAT rewrites the source address of outbound datagrams, so the local
//! engine cannot know what endpoint the outside world sees for it. Discovery
//! is a one-shot probe exchange: the engine sends a probe to its remote, and
//! the remote replies with the source address it observed, in textual
//! `ip:port` form. Each exchange is independent; the mapping may change
//! between calls.

use std::net::SocketAddr;

/// Parse a discovery reply payload into the reflected address.
///
/// Replies are UTF-8 `ip:port` text, optionally newline-terminated. Anything
/// else is not a usable reflection.
pub fn parse_reflected_addr(payload: &[u8]) -> Option<SocketAddr> {
    let text = std::str::from_utf8(payload).ok()?;
    text.trim().parse().ok()
}

/// Build the reply payload a reflector sends back for a probe received from
/// `observed`.
///
/// This is the peer-side half of the exchange: any engine (or any UDP
/// service) that answers probes this way can serve as a reflector.
pub fn reflect(observed: SocketAddr) -> Vec<u8> {
    observed.to_string().into_bytes()
}
