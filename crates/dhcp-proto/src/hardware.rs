use std::fmt;
use std::str::FromStr;

use crate::constants::SIZE_CHADDR;
use crate::{Enumeration, ProtoError, Result};

closed_enum! {
    /// ARP hardware types (RFC 1700)
    pub enum HardwareType in "ARPHardwareType" {
        Ethernet = 1 => "HW_ETHERNET",
        ExperimentalEthernet = 2 => "HW_EXPERIMENTAL_ETHERNET",
        AmateurRadioAx25 = 3 => "HW_AMATEUR_RADIO_AX_25",
        ProteonTokenRing = 4 => "HW_PROTEON_TOKEN_RING",
        Chaos = 5 => "HW_CHAOS",
        Ieee802Networks = 6 => "HW_IEEE_802_NETWORKS",
        Arcnet = 7 => "HW_ARCNET",
        Hyperchannel = 8 => "HW_HYPERCHANNEL",
        Lanstar = 9 => "HW_LANSTAR",
    }
}

/// Client hardware address: a hardware type and its raw address bytes.
///
/// The type is kept as the raw `htype` byte so addresses of types outside
/// [`HardwareType`] (InfiniBand, IEEE 1394, ...) still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HardwareAddress {
    htype: u8,
    address: Vec<u8>,
}

impl HardwareAddress {
    pub fn new(hardware_type: HardwareType, address: impl Into<Vec<u8>>) -> Self {
        Self::from_raw(hardware_type.value(), address)
    }

    /// Create an address tagged with a raw `htype` value
    pub fn from_raw(htype: u8, address: impl Into<Vec<u8>>) -> Self {
        Self {
            htype,
            address: address.into(),
        }
    }

    /// Create an Ethernet (MAC-48) address
    pub fn ethernet(bytes: [u8; 6]) -> Self {
        Self::new(HardwareType::Ethernet, bytes)
    }

    /// The same address bytes tagged with another `htype`
    pub fn with_htype(self, htype: u8) -> Self {
        Self { htype, ..self }
    }

    /// `None` when the type is not a registered [`HardwareType`]
    pub fn hardware_type(&self) -> Option<HardwareType> {
        HardwareType::lookup_by_value(self.htype)
    }

    pub fn htype(&self) -> u8 {
        self.htype
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.address
    }

    pub fn len(&self) -> usize {
        self.address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }

    /// The 6 bytes written to the `chaddr` field.
    pub fn chaddr_bytes(&self) -> Result<[u8; SIZE_CHADDR]> {
        <[u8; SIZE_CHADDR]>::try_from(self.address.as_slice()).map_err(|_| {
            ProtoError::MalformedHardwareAddress(format!(
                "expected {} bytes, got {}",
                SIZE_CHADDR,
                self.address.len()
            ))
        })
    }
}

/// Parses a colon separated hex string (`aa:bb:cc:dd:ee:ff`) as an Ethernet
/// address. Any number of octets is accepted here; the 6 byte requirement is
/// enforced when the address is written into a packet.
impl FromStr for HardwareAddress {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self> {
        let address = s
            .split(':')
            .map(|part| {
                let valid = !part.is_empty()
                    && part.len() <= 2
                    && part.bytes().all(|b| b.is_ascii_hexdigit());
                if !valid {
                    return Err(ProtoError::MalformedHardwareAddress(format!(
                        "invalid octet '{}' in '{}'",
                        part, s
                    )));
                }
                u8::from_str_radix(part, 16)
                    .map_err(|e| ProtoError::MalformedHardwareAddress(e.to_string()))
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self::new(HardwareType::Ethernet, address))
    }
}

/// Formats as lowercase `xx:xx:xx:xx:xx:xx`
impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.address.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
