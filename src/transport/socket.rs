//! Async UDP socket wrapper.
//!
//! Thin layer over `tokio::net::UdpSocket` that owns the receive staging
//! buffer, so callers only ever see the exact payload of one datagram.

use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;

use crate::core::constants::RECV_BUFFER_SIZE;

/// UDP socket with an internal receive staging buffer.
#[derive(Debug)]
pub struct EngineSocket {
    /// The underlying UDP socket.
    socket: UdpSocket,
    /// Staging buffer for incoming datagrams.
    recv_buffer: Vec<u8>,
}

impl EngineSocket {
    /// Bind a socket to the given local address.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self::from_socket(socket))
    }

    /// Wrap an existing UDP socket.
    pub fn from_socket(socket: UdpSocket) -> Self {
        Self {
            socket,
            recv_buffer: vec![0u8; RECV_BUFFER_SIZE],
        }
    }

    /// Get the bound local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Send one datagram to a specific address.
    ///
    /// Returns the number of bytes the socket accepted; for UDP this is the
    /// whole payload or an error, never a partial send.
    pub async fn send_to(&self, data: &[u8], addr: SocketAddr) -> io::Result<usize> {
        self.socket.send_to(data, addr).await
    }

    /// Receive one datagram and return its payload and sender address.
    ///
    /// The returned slice borrows the staging buffer and is valid until the
    /// next receive.
    pub async fn recv_from(&mut self) -> io::Result<(&[u8], SocketAddr)> {
        let (len, addr) = self.socket.recv_from(&mut self.recv_buffer).await?;
        Ok((&self.recv_buffer[..len], addr))
    }
}
