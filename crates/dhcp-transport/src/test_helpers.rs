#[cfg(test)]
use crate::config::Config;
#[cfg(test)]
use crate::messages::DiscoverRequest;
#[cfg(test)]
use dhcp_proto::{DhcpOption, DhcpOptions, DhcpPacket, HardwareAddress, MessageType};
#[cfg(test)]
use std::net::Ipv4Addr;

#[cfg(test)]
pub const TEST_XID: u32 = 0x1234_5678;

/// Loopback configuration; tests bind to port 0 explicitly.
#[cfg(test)]
pub fn create_test_config() -> Config {
    Config {
        bind_address: Ipv4Addr::LOCALHOST,
        broadcast_address: Ipv4Addr::LOCALHOST,
        ..Config::default()
    }
}

#[cfg(test)]
pub fn create_discover_request(mac: &str) -> DiscoverRequest {
    DiscoverRequest {
        xid: TEST_XID,
        chaddr: mac.parse().unwrap(),
        options: DhcpOptions::new(),
    }
}

/// Create a packet of the given DHCP message type
#[cfg(test)]
pub fn create_packet(message_type: MessageType) -> DhcpPacket {
    let mut packet = DhcpPacket::new();
    packet.xid = Some(TEST_XID);
    packet.chaddr = Some(HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
    packet
        .options
        .insert(DhcpOption::MessageType(message_type));
    packet
}
