//! The engine: one bound socket, one remote endpoint, one session.
//!
//! An [`Engine`] owns its socket, pacing state, and transfer ledger
//! exclusively. Ownership replaces the opaque-handle contract of the native
//! surface this crate descends from: the engine is move-only, [`Engine::close`]
//! consumes it, and use-after-close is therefore unrepresentable.
//!
//! Every transfer moves exactly one datagram. Partial datagrams do not
//! exist: a datagram larger than the caller's buffer is an error, never a
//! truncation.

use std::net::SocketAddr;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace};

use crate::core::{EngineConfig, EngineError, EngineResult};

use super::discovery;
use super::ledger::{LedgerSnapshot, TransferLedger};
use super::pacing::PacingState;
use super::resolve;
use super::socket::EngineSocket;

/// Outcome of a single admission-controlled transfer attempt.
///
/// The legacy surface folded "not admitted", "timed out", and "failed" into
/// one boolean; this enum keeps the transient conditions apart from genuine
/// faults, which travel through [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// The datagram moved; payload byte count.
    Complete(usize),
    /// Pacing refused admission; retry later.
    NotReady,
    /// The socket timeout elapsed without a datagram.
    TimedOut,
}

/// A point-to-point paced datagram engine.
///
/// Created by [`Engine::create`], destroyed by [`Engine::close`] (or drop).
/// All transferring operations take `&mut self`: one handle, one caller at
/// a time, exactly as the underlying contract requires.
#[derive(Debug)]
pub struct Engine {
    socket: EngineSocket,
    remote: SocketAddr,
    config: EngineConfig,
    pacing: PacingState,
    ledger: TransferLedger,
}

impl Engine {
    /// Resolve both endpoints, bind the local one, and initialize a fresh
    /// engine with zeroed counters.
    ///
    /// `binding` of `None` binds the wildcard address with an OS-chosen
    /// port. Fails when either spec does not resolve or the bind itself
    /// fails (port in use, permission denied); any such error is
    /// construction-classified and the engine was never created.
    pub async fn create(
        binding: Option<&str>,
        remote: &str,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let remote = resolve::resolve(remote).await?;
        let local = resolve::resolve_binding(binding).await?;

        let socket = EngineSocket::bind(local)
            .await
            .map_err(|source| EngineError::Bind { addr: local, source })?;

        let bound = socket.local_addr()?;
        debug!(local = %bound, %remote, "engine created");

        Ok(Self {
            socket,
            remote,
            pacing: PacingState::new(config.pacing.packet_budget, config.pacing.packet_interval),
            ledger: TransferLedger::new(),
            config,
        })
    }

    /// Check whether a read of `size` bytes would be admitted now.
    ///
    /// Pure readiness check; nothing is consumed and no datagram moves.
    pub fn may_read(&self, size: u64) -> bool {
        self.pacing.read.admit(size, Instant::now()).is_admit()
    }

    /// Check whether a write scheduled for `at` would be admitted.
    pub fn may_write_at(&self, at: Instant) -> bool {
        self.pacing.write.ready_at(at)
    }

    /// Check whether a write would be admitted now.
    pub fn may_write(&self) -> bool {
        self.may_write_at(Instant::now())
    }

    /// Receive one datagram from the remote endpoint into `buf`.
    ///
    /// Admission is consulted first: an unpaced caller gets
    /// [`Transfer::NotReady`] without touching the socket. Datagrams from
    /// any other sender are dropped and the wait continues. The whole call
    /// is bounded by the configured socket timeout.
    pub async fn read(&mut self, buf: &mut [u8]) -> EngineResult<Transfer> {
        let now = Instant::now();
        if !self.pacing.read.admit(buf.len() as u64, now).is_admit() {
            return Ok(Transfer::NotReady);
        }

        let deadline = now + self.config.socket_timeout;
        loop {
            let (payload, from) = match timeout_at(deadline, self.socket.recv_from()).await {
                Err(_) => return Ok(Transfer::TimedOut),
                Ok(Err(e)) => return Err(e.into()),
                Ok(Ok(received)) => received,
            };

            if from != self.remote {
                trace!(%from, "dropping datagram from foreign sender");
                continue;
            }

            let len = payload.len();
            if len > buf.len() {
                return Err(EngineError::PacketTooLarge {
                    len,
                    capacity: buf.len(),
                });
            }

            buf[..len].copy_from_slice(payload);
            self.pacing.read.record(len as u64, Instant::now());
            self.ledger.record_received(len as u64);
            trace!(bytes = len, "datagram received");
            return Ok(Transfer::Complete(len));
        }
    }

    /// Send `payload` as one datagram to the remote endpoint.
    ///
    /// Admission is consulted first; a refused write returns
    /// [`Transfer::NotReady`] and sends nothing. The ledger advances by the
    /// byte count the socket reports.
    pub async fn write(&mut self, payload: &[u8]) -> EngineResult<Transfer> {
        let now = Instant::now();
        if !self.pacing.write.admit(payload.len() as u64, now).is_admit() {
            return Ok(Transfer::NotReady);
        }

        let deadline = now + self.config.socket_timeout;
        let sent = match timeout_at(deadline, self.socket.send_to(payload, self.remote)).await {
            Err(_) => return Ok(Transfer::TimedOut),
            Ok(Err(e)) => return Err(e.into()),
            Ok(Ok(sent)) => sent,
        };

        self.pacing.write.record(sent as u64, Instant::now());
        self.ledger.record_sent(sent as u64);
        trace!(bytes = sent, "datagram sent");
        Ok(Transfer::Complete(sent))
    }

    /// Learn the externally visible address of the local endpoint.
    ///
    /// Sends `probe` to the remote and waits (up to the socket timeout) for
    /// a reply carrying the address the remote observed, in textual
    /// `ip:port` form. Returns `Ok(None)` when the window elapses or the
    /// reply is not a usable reflection. Independent of pacing and of the
    /// transfer ledger; safe to call repeatedly, though the mapping may
    /// change between calls.
    pub async fn discover_ip(&mut self, probe: &[u8]) -> EngineResult<Option<SocketAddr>> {
        self.socket.send_to(probe, self.remote).await?;

        let deadline = Instant::now() + self.config.socket_timeout;
        loop {
            let (payload, from) = match timeout_at(deadline, self.socket.recv_from()).await {
                Err(_) => return Ok(None),
                Ok(Err(e)) => return Err(e.into()),
                Ok(Ok(received)) => received,
            };

            if from != self.remote {
                continue;
            }

            return Ok(discovery::parse_reflected_addr(payload));
        }
    }

    /// Cumulative payload bytes sent since creation. Never decreases.
    pub fn bytes_sent(&self) -> u64 {
        self.ledger.bytes_sent()
    }

    /// Cumulative payload bytes received since creation. Never decreases.
    pub fn bytes_received(&self) -> u64 {
        self.ledger.bytes_received()
    }

    /// The full transfer ledger.
    pub fn ledger(&self) -> &TransferLedger {
        &self.ledger
    }

    /// The bound local address.
    pub fn local_addr(&self) -> EngineResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// The resolved remote endpoint.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Release the socket and return the final counters.
    ///
    /// Consuming `self` makes a second close, or any call after close, a
    /// compile error. Dropping the engine releases the socket too; `close`
    /// exists to hand the final totals back.
    pub fn close(self) -> LedgerSnapshot {
        let snapshot = self.ledger.snapshot();
        debug!(
            bytes_sent = snapshot.bytes_sent,
            bytes_received = snapshot.bytes_received,
            "engine closed"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::PacingConfig;

    fn paced_config(interval: Duration) -> EngineConfig {
        EngineConfig::default()
            .with_socket_timeout(Duration::from_millis(200))
            .with_pacing(
                PacingConfig::default()
                    .with_packet_budget(1500)
                    .with_packet_interval(interval),
            )
    }

    #[tokio::test]
    async fn test_create_binds_ephemeral_port() {
        let engine = Engine::create(None, "127.0.0.1:9000", EngineConfig::default())
            .await
            .unwrap();
        assert!(engine.local_addr().unwrap().port() != 0);
        assert_eq!(engine.remote_addr().port(), 9000);
    }

    #[tokio::test]
    async fn test_create_malformed_remote_fails() {
        let err = Engine::create(None, "no such endpoint", EngineConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_construction());
    }

    #[tokio::test]
    async fn test_create_malformed_binding_fails() {
        let err = Engine::create(Some("???"), "127.0.0.1:9000", EngineConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_construction());
    }

    #[tokio::test]
    async fn test_counters_start_zeroed() {
        let engine = Engine::create(None, "127.0.0.1:9000", EngineConfig::default())
            .await
            .unwrap();
        assert_eq!(engine.bytes_sent(), 0);
        assert_eq!(engine.bytes_received(), 0);
    }

    #[tokio::test]
    async fn test_zero_size_read_never_admitted() {
        let engine = Engine::create(None, "127.0.0.1:9000", paced_config(Duration::ZERO))
            .await
            .unwrap();
        assert!(!engine.may_read(0));
        assert!(engine.may_read(1500));
        assert!(!engine.may_read(1501));
    }

    #[tokio::test]
    async fn test_refused_read_touches_nothing() {
        let mut engine = Engine::create(None, "127.0.0.1:9000", paced_config(Duration::ZERO))
            .await
            .unwrap();

        // Over-budget buffer: refused before the socket is consulted, so
        // this returns immediately despite no peer existing.
        let mut buf = [0u8; 4096];
        assert_eq!(engine.read(&mut buf).await.unwrap(), Transfer::NotReady);
        assert_eq!(engine.bytes_received(), 0);
    }

    #[tokio::test]
    async fn test_write_interval_enforced() {
        let mut engine = Engine::create(
            None,
            "127.0.0.1:9000",
            paced_config(Duration::from_millis(100)),
        )
        .await
        .unwrap();

        assert!(matches!(
            engine.write(b"one").await.unwrap(),
            Transfer::Complete(3)
        ));
        // Immediately after a send the interval has not replenished.
        assert_eq!(engine.write(b"two").await.unwrap(), Transfer::NotReady);
        assert!(!engine.may_write());
        assert!(engine.may_write_at(Instant::now() + Duration::from_millis(100)));

        tokio::time::sleep(Duration::from_millis(110)).await;
        assert!(matches!(
            engine.write(b"two").await.unwrap(),
            Transfer::Complete(3)
        ));
    }

    #[tokio::test]
    async fn test_close_returns_final_counters() {
        let mut engine = Engine::create(None, "127.0.0.1:9000", EngineConfig::default())
            .await
            .unwrap();
        engine.write(b"PING").await.unwrap();

        let snapshot = engine.close();
        assert_eq!(snapshot.bytes_sent, 4);
        assert_eq!(snapshot.datagrams_sent, 1);
        assert_eq!(snapshot.bytes_received, 0);
    }

    #[tokio::test]
    async fn test_close_releases_port() {
        let engine = Engine::create(Some("127.0.0.1:0"), "127.0.0.1:9000", EngineConfig::default())
            .await
            .unwrap();
        let local = engine.local_addr().unwrap();
        engine.close();

        // The port is free again once the engine is gone.
        let reused = Engine::create(
            Some(&local.to_string()),
            "127.0.0.1:9000",
            EngineConfig::default(),
        )
        .await;
        assert!(reused.is_ok());
    }
}
