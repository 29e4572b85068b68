use std::marker::PhantomData;
use std::net::{Ipv4Addr, SocketAddr};

use dhcp_proto::constants::MAX_PACKET_SIZE;
use dhcp_proto::DhcpPacket;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dispatch::{ClientRole, Role, ServerRole};
use crate::error::Result;

/// Overrides for [`Endpoint::broadcast_packet`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    pub host: Option<Ipv4Addr>,
    pub port: Option<u16>,
}

/// A UDP socket speaking DHCP for one side of the exchange.
///
/// Received datagrams are decoded one at a time; anything that fails to
/// decode is logged and dropped.
pub struct Endpoint<R: Role> {
    socket: UdpSocket,
    broadcast_address: Ipv4Addr,
    peer_port: u16,
    _role: PhantomData<R>,
}

pub type DhcpServer = Endpoint<ServerRole>;
pub type DhcpClient = Endpoint<ClientRole>;

impl<R: Role> Endpoint<R> {
    /// Bind to the configured address and the role's port
    pub async fn bind(config: &Config) -> Result<Self> {
        Self::bind_to(config, config.bind_address, R::local_port(config)).await
    }

    /// Bind to an explicit address with broadcast enabled
    pub async fn bind_to(config: &Config, host: Ipv4Addr, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind(SocketAddr::new(host.into(), port)).await?;
        socket.set_broadcast(true)?;

        info!("DHCP {} listening on {}", R::NAME, socket.local_addr()?);

        Ok(Self {
            socket,
            broadcast_address: config.broadcast_address,
            peer_port: R::peer_port(config),
            _role: PhantomData,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Send to the broadcast address and the peer port, or to the overrides
    /// in `options`.
    pub async fn broadcast_packet(&self, bytes: &[u8], options: SendOptions) -> Result<usize> {
        let host = options.host.unwrap_or(self.broadcast_address);
        self.send_packet(bytes, host, options.port).await
    }

    /// Send to `host` on the peer port unless `port` is given.
    pub async fn send_packet(
        &self,
        bytes: &[u8],
        host: Ipv4Addr,
        port: Option<u16>,
    ) -> Result<usize> {
        let dst = SocketAddr::new(host.into(), port.unwrap_or(self.peer_port));
        let sent = self.socket.send_to(bytes, dst).await?;
        debug!("Sent {} bytes to {}", sent, dst);
        Ok(sent)
    }

    /// Wait for the next datagram that decodes and classify it.
    pub async fn recv(&self) -> Result<(R::Event, SocketAddr)> {
        let mut buf = vec![0u8; MAX_PACKET_SIZE];

        loop {
            let (len, src) = self.socket.recv_from(&mut buf).await?;
            debug!("Received {} bytes from {}", len, src);

            match DhcpPacket::parse(&buf[..len]) {
                Ok(packet) => return Ok((R::classify(packet), src)),
                Err(e) => {
                    warn!("Dropping datagram from {}: {}", src, e);
                }
            }
        }
    }
}
