use std::net::Ipv4Addr;

use bytes::BufMut;
use tracing::{debug, trace};

use crate::constants::{MAX_OPTION_LENGTH, MAX_PARAMETER_REQUEST_LIST, MIN_PACKET_SIZE};
use crate::wire::{self, Reader};
use crate::{Enumeration, MessageType, Result};

closed_enum! {
    /// Option codes known to the codec (RFC 1533 / RFC 2132)
    pub enum OptionCode in "DHCPOptionCode" {
        Pad = 0 => "pad",
        SubnetMask = 1 => "subnetMask",
        RequestedIpAddress = 50 => "requestedIpAddress",
        DhcpMessageType = 53 => "dhcpMessageType",
        ServerIdentifier = 54 => "serverIdentifier",
        ParameterRequestList = 55 => "parameterRequestList",
        ClientIdentifier = 61 => "clientIdentifier",
        End = 255 => "end",
    }
}

/// DHCP options as defined in RFC 2132
///
/// `End` and `Pad` are framing, not data, and have no variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhcpOption {
    SubnetMask(Ipv4Addr),
    RequestedIpAddress(Ipv4Addr),
    MessageType(MessageType),
    ServerIdentifier(Ipv4Addr),
    /// Option codes the client wants the server to return.
    ParameterRequestList(Vec<u8>),
    /// `hardware_type` is the leading type byte; identifiers built locally
    /// use 0.
    ClientIdentifier {
        hardware_type: u8,
        identifier: Vec<u8>,
    },
    /// Kept on decode, never emitted on encode.
    Unknown(u8, Vec<u8>),
}

impl DhcpOption {
    /// Client identifier with the hardware type placeholder set to 0.
    pub fn client_identifier(identifier: impl Into<Vec<u8>>) -> Self {
        Self::ClientIdentifier {
            hardware_type: 0,
            identifier: identifier.into(),
        }
    }

    /// Wire code of the option
    pub fn code(&self) -> u8 {
        match self {
            Self::SubnetMask(_) => OptionCode::SubnetMask.value(),
            Self::RequestedIpAddress(_) => OptionCode::RequestedIpAddress.value(),
            Self::MessageType(_) => OptionCode::DhcpMessageType.value(),
            Self::ServerIdentifier(_) => OptionCode::ServerIdentifier.value(),
            Self::ParameterRequestList(_) => OptionCode::ParameterRequestList.value(),
            Self::ClientIdentifier { .. } => OptionCode::ClientIdentifier.value(),
            Self::Unknown(code, _) => *code,
        }
    }

    /// Parse a DHCP option from code and data bytes
    ///
    /// Payloads that do not have the shape the code calls for are kept as
    /// `Unknown` so that nothing received is lost.
    pub fn parse(code: u8, data: &[u8]) -> Self {
        let parsed = match OptionCode::lookup_by_value(code) {
            Some(OptionCode::SubnetMask) => wire::ipv4_payload(data).map(Self::SubnetMask),
            Some(OptionCode::RequestedIpAddress) => {
                wire::ipv4_payload(data).map(Self::RequestedIpAddress)
            }
            Some(OptionCode::ServerIdentifier) => {
                wire::ipv4_payload(data).map(Self::ServerIdentifier)
            }
            Some(OptionCode::DhcpMessageType) => match data {
                [value] => MessageType::lookup_by_value(*value).map(Self::MessageType),
                _ => None,
            },
            Some(OptionCode::ParameterRequestList) if !data.is_empty() => {
                Some(Self::ParameterRequestList(data.to_vec()))
            }
            Some(OptionCode::ClientIdentifier) => match data {
                [hardware_type, identifier @ ..] => Some(Self::ClientIdentifier {
                    hardware_type: *hardware_type,
                    identifier: identifier.to_vec(),
                }),
                [] => None,
            },
            _ => None,
        };

        parsed.unwrap_or_else(|| {
            trace!(code, len = data.len(), "keeping raw option");
            Self::Unknown(code, data.to_vec())
        })
    }

    /// Append `[code, length, payload]` to `dst`.
    ///
    /// Lengths are validated before anything is written. `Unknown` options
    /// are skipped.
    pub fn write_to<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        match self {
            Self::SubnetMask(addr)
            | Self::RequestedIpAddress(addr)
            | Self::ServerIdentifier(addr) => {
                dst.put_u8(self.code());
                dst.put_u8(4);
                wire::put_ipv4(dst, *addr);
            }
            Self::MessageType(mt) => {
                dst.put_u8(self.code());
                dst.put_u8(1);
                dst.put_u8(mt.value());
            }
            Self::ParameterRequestList(codes) => {
                let len = wire::option_length(
                    OptionCode::ParameterRequestList,
                    codes.len(),
                    MAX_PARAMETER_REQUEST_LIST,
                )?;
                dst.put_u8(self.code());
                dst.put_u8(len);
                dst.put_slice(codes);
            }
            Self::ClientIdentifier {
                hardware_type,
                identifier,
            } => {
                let len = wire::option_length(
                    OptionCode::ClientIdentifier,
                    1 + identifier.len(),
                    MAX_OPTION_LENGTH,
                )?;
                dst.put_u8(self.code());
                dst.put_u8(len);
                dst.put_u8(*hardware_type);
                dst.put_slice(identifier);
            }
            Self::Unknown(code, _) => {
                debug!(code, "not encoding unrecognized option");
            }
        }
        Ok(())
    }
}

/// Ordered set of options keyed by option code. Iteration order is wire
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpOptions(Vec<DhcpOption>);

impl DhcpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option, replacing in place any option with the same code.
    /// Returns the replaced option.
    pub fn insert(&mut self, option: DhcpOption) -> Option<DhcpOption> {
        match self.0.iter_mut().find(|o| o.code() == option.code()) {
            Some(slot) => Some(std::mem::replace(slot, option)),
            None => {
                self.0.push(option);
                None
            }
        }
    }

    pub fn get(&self, code: u8) -> Option<&DhcpOption> {
        self.0.iter().find(|o| o.code() == code)
    }

    pub fn remove(&mut self, code: u8) -> Option<DhcpOption> {
        let index = self.0.iter().position(|o| o.code() == code)?;
        Some(self.0.remove(index))
    }

    pub fn contains(&self, code: OptionCode) -> bool {
        self.get(code.value()).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DhcpOption> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the message type from the options
    pub fn message_type(&self) -> Option<MessageType> {
        match self.get(OptionCode::DhcpMessageType.value())? {
            DhcpOption::MessageType(mt) => Some(*mt),
            _ => None,
        }
    }

    /// Raw value of option 53, including values outside [`MessageType`].
    pub fn raw_message_type(&self) -> Option<u8> {
        match self.get(OptionCode::DhcpMessageType.value())? {
            DhcpOption::MessageType(mt) => Some(mt.value()),
            DhcpOption::Unknown(_, data) if data.len() == 1 => Some(data[0]),
            _ => None,
        }
    }

    pub fn requested_ip_address(&self) -> Option<Ipv4Addr> {
        match self.get(OptionCode::RequestedIpAddress.value())? {
            DhcpOption::RequestedIpAddress(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn server_identifier(&self) -> Option<Ipv4Addr> {
        match self.get(OptionCode::ServerIdentifier.value())? {
            DhcpOption::ServerIdentifier(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn subnet_mask(&self) -> Option<Ipv4Addr> {
        match self.get(OptionCode::SubnetMask.value())? {
            DhcpOption::SubnetMask(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Write the option block and packet trailer: every option, the `end`
    /// marker, alignment padding, then zero fill up to the minimum BOOTP
    /// packet size. `packet` holds everything written so far.
    pub(crate) fn encode(&self, packet: &mut Vec<u8>) -> Result<()> {
        for option in &self.0 {
            option.write_to(packet)?;
        }

        packet.put_u8(OptionCode::End.value());

        if packet.len() % 2 == 1 {
            packet.put_u8(0);
        } else {
            packet.put_u16(0);
        }

        if packet.len() < MIN_PACKET_SIZE {
            packet.resize(MIN_PACKET_SIZE, 0);
        }
        Ok(())
    }

    /// Read options up to and including the `end` marker.
    pub(crate) fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let mut options = Self::new();
        loop {
            let code = reader.u8("option code")?;
            if code == OptionCode::End.value() {
                break;
            }
            if code == OptionCode::Pad.value() {
                continue;
            }

            let len = reader.u8("option length")?;
            let data = reader.bytes(len as usize, "option payload")?;
            if let Some(previous) = options.insert(DhcpOption::parse(code, data)) {
                debug!(code = previous.code(), "duplicate option, keeping the last one");
            }
        }
        Ok(options)
    }
}

impl<'a> IntoIterator for &'a DhcpOptions {
    type Item = &'a DhcpOption;
    type IntoIter = std::slice::Iter<'a, DhcpOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<DhcpOption> for DhcpOptions {
    fn from_iter<I: IntoIterator<Item = DhcpOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.insert(option);
        }
        options
    }
}
