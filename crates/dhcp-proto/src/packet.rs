use std::net::Ipv4Addr;

use bytes::BufMut;
use tracing::trace;

use crate::constants::*;
use crate::wire::{self, Reader};
use crate::{
    BootpMessageType, DhcpOptions, Enumeration, HardwareAddress, HardwareType, MessageType,
    ProtoError, Result,
};

/// DHCP packet structure as defined in RFC 2131
///
/// `xid` and `chaddr` have no default: a packet without them cannot be
/// encoded. Decoded packets always carry both.
///
/// `htype` is the raw header byte. Values outside [`HardwareType`] decode
/// unchanged. The type tag of `chaddr` must equal `htype` when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpPacket {
    pub op: BootpMessageType,             // Message op code
    pub htype: u8,                        // Hardware address type
    pub hlen: u8,                         // Hardware address length
    pub hops: u8,                         // Client sets to zero
    pub xid: Option<u32>,                 // Transaction ID
    pub secs: u16,                        // Seconds elapsed
    pub flags: u16,                       // Flags
    pub ciaddr: Ipv4Addr,                 // Client IP address
    pub yiaddr: Ipv4Addr,                 // 'Your' (client) IP address
    pub siaddr: Ipv4Addr,                 // Server IP address
    pub giaddr: Ipv4Addr,                 // Gateway IP address
    pub chaddr: Option<HardwareAddress>,  // Client hardware address
    pub options: DhcpOptions,
}

impl DhcpPacket {
    /// Create a new empty BOOTREQUEST packet for an Ethernet client
    pub fn new() -> Self {
        Self {
            op: BootpMessageType::BootRequest,
            htype: HardwareType::Ethernet.value(),
            hlen: SIZE_CHADDR as u8,
            hops: 0,
            xid: None,
            secs: 0,
            flags: 0,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: None,
            options: DhcpOptions::new(),
        }
    }

    /// Parse a DHCP packet from raw bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);
        reader.ensure(OPTIONS_OFFSET, "fixed header")?;

        let op = BootpMessageType::try_from(reader.u8("op")?)?;
        let htype = reader.u8("htype")?;
        let hlen = reader.u8("hlen")?;
        let hops = reader.u8("hops")?;
        let xid = reader.u32("xid")?;
        let secs = reader.u16("secs")?;
        let flags = reader.u16("flags")?;

        let ciaddr = reader.ipv4("ciaddr")?;
        let yiaddr = reader.ipv4("yiaddr")?;
        let siaddr = reader.ipv4("siaddr")?;
        let giaddr = reader.ipv4("giaddr")?;

        let chaddr = HardwareAddress::from_raw(htype, reader.bytes(SIZE_CHADDR, "chaddr")?);
        reader.skip(SIZE_CHADDR_PADDING + SIZE_RESERVED, "sname/file")?;

        let cookie = reader.u32("magic cookie")?;
        if cookie != MAGIC_COOKIE {
            return Err(ProtoError::InvalidMagicCookie(cookie));
        }

        let options = DhcpOptions::decode(&mut reader)?;
        trace!(xid, options = options.len(), "decoded packet");

        Ok(Self {
            op,
            htype,
            hlen,
            hops,
            xid: Some(xid),
            secs,
            flags,
            ciaddr,
            yiaddr,
            siaddr,
            giaddr,
            chaddr: Some(chaddr),
            options,
        })
    }

    /// Serialize the packet to bytes
    ///
    /// The result is at least 300 bytes long and holds exactly the bytes
    /// written.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let xid = self.xid.ok_or(ProtoError::MissingRequiredField("xid"))?;
        let chaddr = self
            .chaddr
            .as_ref()
            .ok_or(ProtoError::MissingRequiredField("chaddr"))?;
        if chaddr.htype() != self.htype {
            return Err(ProtoError::MalformedHardwareAddress(format!(
                "address type {} does not match htype {}",
                chaddr.htype(),
                self.htype
            )));
        }
        let chaddr = chaddr.chaddr_bytes()?;

        let mut bytes = Vec::with_capacity(MAX_PACKET_SIZE);

        bytes.put_u8(self.op.into());
        bytes.put_u8(self.htype);
        bytes.put_u8(self.hlen);
        bytes.put_u8(self.hops);

        bytes.put_u32(xid);
        bytes.put_u16(self.secs);
        bytes.put_u16(self.flags);

        wire::put_ipv4(&mut bytes, self.ciaddr);
        wire::put_ipv4(&mut bytes, self.yiaddr);
        wire::put_ipv4(&mut bytes, self.siaddr);
        wire::put_ipv4(&mut bytes, self.giaddr);

        bytes.put_slice(&chaddr);
        bytes.put_bytes(0, SIZE_CHADDR_PADDING);
        bytes.put_bytes(0, SIZE_RESERVED);

        bytes.put_u32(MAGIC_COOKIE);

        self.options.encode(&mut bytes)?;

        Ok(bytes)
    }

    /// Set `chaddr` and take `htype` from its type tag
    pub fn set_chaddr(&mut self, chaddr: HardwareAddress) {
        self.htype = chaddr.htype();
        self.chaddr = Some(chaddr);
    }

    /// The registered hardware type of `htype`, if any
    pub fn hardware_type(&self) -> Option<HardwareType> {
        HardwareType::lookup_by_value(self.htype)
    }

    /// Get the message type from the options
    pub fn message_type(&self) -> Option<MessageType> {
        self.options.message_type()
    }

    pub fn is_broadcast(&self) -> bool {
        self.flags & FLAG_BROADCAST != 0
    }

    pub fn set_broadcast(&mut self, broadcast: bool) {
        if broadcast {
            self.flags |= FLAG_BROADCAST;
        } else {
            self.flags &= !FLAG_BROADCAST;
        }
    }
}

impl Default for DhcpPacket {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DhcpOption;

    fn discover() -> DhcpPacket {
        let mut packet = DhcpPacket::new();
        packet.xid = Some(0x12345678);
        packet.chaddr = Some(HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
        packet
            .options
            .insert(DhcpOption::MessageType(MessageType::Discover));
        packet
    }

    #[test]
    fn test_packet_creation() {
        let packet = DhcpPacket::new();
        assert_eq!(packet.op, BootpMessageType::BootRequest);
        assert_eq!(packet.htype, 1);
        assert_eq!(packet.hardware_type(), Some(HardwareType::Ethernet));
        assert_eq!(packet.hlen, 6);
        assert_eq!(packet.ciaddr, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_packet_too_small() {
        let data = vec![0u8; 100];
        assert!(matches!(
            DhcpPacket::parse(&data),
            Err(ProtoError::TruncatedBuffer { what: "fixed header", offset: 0 })
        ));
    }

    #[test]
    fn test_fixed_header_layout() {
        let mut packet = discover();
        packet.secs = 0x0102;
        packet.set_broadcast(true);
        packet.ciaddr = Ipv4Addr::new(10, 0, 0, 1);
        packet.giaddr = Ipv4Addr::new(10, 0, 0, 254);

        let bytes = packet.to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &[1, 1, 6, 0]);
        assert_eq!(&bytes[4..8], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(&bytes[8..10], &[0x01, 0x02]);
        assert_eq!(&bytes[10..12], &[0x80, 0x00]);
        assert_eq!(&bytes[12..16], &[10, 0, 0, 1]);
        assert_eq!(&bytes[24..28], &[10, 0, 0, 254]);
        assert_eq!(&bytes[28..34], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert!(bytes[34..236].iter().all(|b| *b == 0));
        assert_eq!(
            &bytes[MAGIC_COOKIE_OFFSET..OPTIONS_OFFSET],
            &MAGIC_COOKIE.to_be_bytes()
        );
        assert_eq!(&bytes[OPTIONS_OFFSET..OPTIONS_OFFSET + 4], &[53, 1, 1, 255]);
        assert_eq!(bytes.len(), MIN_PACKET_SIZE);
    }

    #[test]
    fn test_packet_round_trip() {
        let packet = discover();
        let bytes = packet.to_bytes().unwrap();
        let parsed = DhcpPacket::parse(&bytes).unwrap();

        assert_eq!(parsed, packet);
        assert_eq!(parsed.message_type(), Some(MessageType::Discover));
    }

    #[test]
    fn test_missing_xid() {
        let mut packet = discover();
        packet.xid = None;
        assert_eq!(
            packet.to_bytes(),
            Err(ProtoError::MissingRequiredField("xid"))
        );
    }

    #[test]
    fn test_missing_chaddr() {
        let mut packet = discover();
        packet.chaddr = None;
        assert_eq!(
            packet.to_bytes(),
            Err(ProtoError::MissingRequiredField("chaddr"))
        );
    }

    #[test]
    fn test_unknown_op_rejected() {
        let mut bytes = discover().to_bytes().unwrap();
        bytes[0] = 7;
        assert_eq!(
            DhcpPacket::parse(&bytes),
            Err(ProtoError::UnrecognizedEnumValue {
                set: "BOOTPMessageType",
                value: 7
            })
        );
    }

    #[test]
    fn test_unregistered_htype_decodes() {
        let mut bytes = discover().to_bytes().unwrap();
        bytes[1] = 32;

        let packet = DhcpPacket::parse(&bytes).unwrap();
        assert_eq!(packet.htype, 32);
        assert_eq!(packet.hardware_type(), None);
        assert_eq!(packet.chaddr.as_ref().unwrap().htype(), 32);
        assert_eq!(packet.message_type(), Some(MessageType::Discover));
        assert_eq!(packet.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_chaddr_type_must_match_htype() {
        let mut packet = discover();
        packet.htype = HardwareType::Ieee802Networks.value();
        assert!(matches!(
            packet.to_bytes(),
            Err(ProtoError::MalformedHardwareAddress(_))
        ));

        let mac = packet.chaddr.take().unwrap();
        packet.set_chaddr(mac.with_htype(HardwareType::Ieee802Networks.value()));
        assert_eq!(packet.to_bytes().unwrap()[1], 6);
    }

    #[test]
    fn test_bad_magic_cookie() {
        let mut bytes = discover().to_bytes().unwrap();
        bytes[MAGIC_COOKIE_OFFSET + 3] = 0x64;
        assert_eq!(
            DhcpPacket::parse(&bytes),
            Err(ProtoError::InvalidMagicCookie(0x6382_5364))
        );
    }

    #[test]
    fn test_missing_end_marker() {
        let bytes = discover().to_bytes().unwrap();
        // header, cookie and the message type option, but no end marker
        assert!(matches!(
            DhcpPacket::parse(&bytes[..243]),
            Err(ProtoError::TruncatedBuffer { what: "option code", offset: 243 })
        ));
    }

    #[test]
    fn test_broadcast_flag() {
        let mut packet = DhcpPacket::new();
        assert!(!packet.is_broadcast());
        packet.set_broadcast(true);
        assert_eq!(packet.flags, 0x8000);
        packet.set_broadcast(false);
        assert_eq!(packet.flags, 0);
    }
}
