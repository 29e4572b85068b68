//! Classification of decoded packets by DHCP message type.
//!
//! Each endpoint role only handles the message types its peer sends. Anything
//! else, including a packet without option 53, becomes an `Unhandled` event
//! for the caller to decide on.

use dhcp_proto::{DhcpPacket, MessageType};

use crate::Config;

/// Side of the exchange an endpoint plays.
pub trait Role {
    const NAME: &'static str;

    type Event;

    /// Port the endpoint listens on.
    fn local_port(config: &Config) -> u16;

    /// Port packets are sent to unless the caller overrides it.
    fn peer_port(config: &Config) -> u16;

    fn classify(packet: DhcpPacket) -> Self::Event;
}

/// Packets a server receives from clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Discover(DhcpPacket),
    Request(DhcpPacket),
    Decline(DhcpPacket),
    Release(DhcpPacket),
    Unhandled {
        message_type: Option<u8>,
        packet: DhcpPacket,
    },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discover(_) => "dhcpDiscover",
            Self::Request(_) => "dhcpRequest",
            Self::Decline(_) => "dhcpDecline",
            Self::Release(_) => "dhcpRelease",
            Self::Unhandled { .. } => "unhandledDHCPMessageType",
        }
    }

    pub fn packet(&self) -> &DhcpPacket {
        match self {
            Self::Discover(packet)
            | Self::Request(packet)
            | Self::Decline(packet)
            | Self::Release(packet)
            | Self::Unhandled { packet, .. } => packet,
        }
    }
}

/// Packets a client receives from servers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Offer(DhcpPacket),
    Ack(DhcpPacket),
    Nak(DhcpPacket),
    Unhandled {
        message_type: Option<u8>,
        packet: DhcpPacket,
    },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Offer(_) => "dhcpOffer",
            Self::Ack(_) => "dhcpAck",
            Self::Nak(_) => "dhcpNak",
            Self::Unhandled { .. } => "unhandledDHCPMessageType",
        }
    }

    pub fn packet(&self) -> &DhcpPacket {
        match self {
            Self::Offer(packet)
            | Self::Ack(packet)
            | Self::Nak(packet)
            | Self::Unhandled { packet, .. } => packet,
        }
    }
}

pub struct ServerRole;

impl Role for ServerRole {
    const NAME: &'static str = "server";

    type Event = ServerEvent;

    fn local_port(config: &Config) -> u16 {
        config.server_port
    }

    fn peer_port(config: &Config) -> u16 {
        config.client_port
    }

    fn classify(packet: DhcpPacket) -> ServerEvent {
        match packet.message_type() {
            Some(MessageType::Discover) => ServerEvent::Discover(packet),
            Some(MessageType::Request) => ServerEvent::Request(packet),
            Some(MessageType::Decline) => ServerEvent::Decline(packet),
            Some(MessageType::Release) => ServerEvent::Release(packet),
            _ => ServerEvent::Unhandled {
                message_type: packet.options.raw_message_type(),
                packet,
            },
        }
    }
}

pub struct ClientRole;

impl Role for ClientRole {
    const NAME: &'static str = "client";

    type Event = ClientEvent;

    fn local_port(config: &Config) -> u16 {
        config.client_port
    }

    fn peer_port(config: &Config) -> u16 {
        config.server_port
    }

    fn classify(packet: DhcpPacket) -> ClientEvent {
        match packet.message_type() {
            Some(MessageType::Offer) => ClientEvent::Offer(packet),
            Some(MessageType::Ack) => ClientEvent::Ack(packet),
            Some(MessageType::Nak) => ClientEvent::Nak(packet),
            _ => ClientEvent::Unhandled {
                message_type: packet.options.raw_message_type(),
                packet,
            },
        }
    }
}
