//! Builders for the packets each role originates.

use std::net::Ipv4Addr;

use dhcp_proto::{
    BootpMessageType, DhcpOption, DhcpOptions, DhcpPacket, HardwareAddress, MessageType,
    OptionCode, Result,
};

/// Caller supplied fields of a DHCPDISCOVER
#[derive(Debug, Clone)]
pub struct DiscoverRequest {
    pub xid: u32,
    pub chaddr: HardwareAddress,
    pub options: DhcpOptions,
}

/// Caller supplied fields of a DHCPOFFER
#[derive(Debug, Clone)]
pub struct OfferRequest {
    pub xid: u32,
    pub chaddr: HardwareAddress,
    pub yiaddr: Ipv4Addr,
    pub options: DhcpOptions,
}

fn base_packet(
    op: BootpMessageType,
    xid: u32,
    chaddr: HardwareAddress,
    mut options: DhcpOptions,
    default_type: MessageType,
) -> DhcpPacket {
    if !options.contains(OptionCode::DhcpMessageType) {
        options.insert(DhcpOption::MessageType(default_type));
    }

    let mut packet = DhcpPacket::new();
    packet.op = op;
    packet.xid = Some(xid);
    packet.set_chaddr(chaddr);
    packet.options = options;
    packet
}

/// Encode a BOOTREQUEST carrying a DHCPDISCOVER, unless the caller set
/// another message type.
pub fn create_discover_packet(request: DiscoverRequest) -> Result<Vec<u8>> {
    base_packet(
        BootpMessageType::BootRequest,
        request.xid,
        request.chaddr,
        request.options,
        MessageType::Discover,
    )
    .to_bytes()
}

/// Encode a BOOTREPLY carrying a DHCPOFFER of `yiaddr`, unless the caller
/// set another message type.
pub fn create_offer_packet(request: OfferRequest) -> Result<Vec<u8>> {
    let mut packet = base_packet(
        BootpMessageType::BootReply,
        request.xid,
        request.chaddr,
        request.options,
        MessageType::Offer,
    );
    packet.yiaddr = request.yiaddr;
    packet.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use dhcp_proto::ProtoError;

    #[test]
    fn test_discover_packet() {
        let bytes = create_discover_packet(create_discover_request("aa:bb:cc:dd:ee:ff")).unwrap();
        let packet = DhcpPacket::parse(&bytes).unwrap();

        assert_eq!(packet.op, BootpMessageType::BootRequest);
        assert_eq!(packet.hlen, 6);
        assert_eq!(packet.xid, Some(TEST_XID));
        assert_eq!(packet.yiaddr, Ipv4Addr::UNSPECIFIED);
        assert_eq!(packet.message_type(), Some(MessageType::Discover));
        assert_eq!(packet.chaddr.unwrap().to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_discover_keeps_caller_options() {
        let mut request = create_discover_request("aa:bb:cc:dd:ee:ff");
        request
            .options
            .insert(DhcpOption::ParameterRequestList(vec![1, 3, 6]));
        request
            .options
            .insert(DhcpOption::MessageType(MessageType::Request));

        let packet = DhcpPacket::parse(&create_discover_packet(request).unwrap()).unwrap();
        assert_eq!(packet.message_type(), Some(MessageType::Request));
        assert_eq!(
            packet.options.iter().next(),
            Some(&DhcpOption::ParameterRequestList(vec![1, 3, 6]))
        );
    }

    #[test]
    fn test_offer_packet() {
        let request = OfferRequest {
            xid: TEST_XID,
            chaddr: "11:22:33:44:55:66".parse().unwrap(),
            yiaddr: Ipv4Addr::new(192, 168, 1, 50),
            options: [DhcpOption::ServerIdentifier(Ipv4Addr::new(192, 168, 1, 1))]
                .into_iter()
                .collect(),
        };

        let packet = DhcpPacket::parse(&create_offer_packet(request).unwrap()).unwrap();
        assert_eq!(packet.op, BootpMessageType::BootReply);
        assert_eq!(packet.yiaddr, Ipv4Addr::new(192, 168, 1, 50));
        assert_eq!(packet.message_type(), Some(MessageType::Offer));
        assert_eq!(
            packet.options.server_identifier(),
            Some(Ipv4Addr::new(192, 168, 1, 1))
        );
    }

    #[test]
    fn test_htype_follows_chaddr() {
        let mut request = create_discover_request("aa:bb:cc:dd:ee:ff");
        request.chaddr = request.chaddr.with_htype(6);

        let packet = DhcpPacket::parse(&create_discover_packet(request).unwrap()).unwrap();
        assert_eq!(packet.htype, 6);
        assert_eq!(packet.chaddr.unwrap().htype(), 6);
    }

    #[test]
    fn test_malformed_chaddr() {
        let result = create_discover_packet(create_discover_request("aa:bb:cc"));
        assert!(matches!(result, Err(ProtoError::MalformedHardwareAddress(_))));
    }
}
