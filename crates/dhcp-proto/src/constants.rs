//! Fixed sizes and offsets of the BOOTP/DHCP packet layout.

/// DHCP magic cookie (RFC 2131)
pub const MAGIC_COOKIE: u32 = 0x6382_5363;

/// Offset of the magic cookie inside the packet.
pub const MAGIC_COOKIE_OFFSET: usize = 236;
/// Offset of the first option byte, right after the magic cookie.
pub const OPTIONS_OFFSET: usize = 240;

pub const SIZE_CHADDR: usize = 6;
/// The chaddr field is 16 bytes on the wire; the MAC-48 is zero padded.
pub const SIZE_CHADDR_PADDING: usize = 10;
/// Legacy `sname` (64 bytes) and `file` (128 bytes) fields.
pub const SIZE_RESERVED: usize = 64 + 128;

/// Minimal BOOTP packet size (RFC 951).
pub const MIN_PACKET_SIZE: usize = 300;
pub const MAX_PACKET_SIZE: usize = 1500;

pub const MAX_PARAMETER_REQUEST_LIST: usize = 16;
pub const MAX_OPTION_LENGTH: usize = u8::MAX as usize;

/// Broadcast bit of the `flags` field (RFC 2131, section 2).
pub const FLAG_BROADCAST: u16 = 0x8000;
