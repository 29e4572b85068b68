//! Generic DHCP packet parsing and serialization library
//!
//! This library implements the BOOTP/DHCP wire format (RFC 951, RFC 1533,
//! RFC 2131) without any transport or business logic. Encoding and decoding
//! are stateless and can be called concurrently from any thread.

#[macro_use]
pub mod registry;

pub mod constants;
pub mod error;
pub mod hardware;
pub mod message_type;
pub mod option;
pub mod packet;
mod wire;

pub use error::{ProtoError, Result};
pub use hardware::{HardwareAddress, HardwareType};
pub use message_type::{BootpMessageType, MessageType};
pub use option::{DhcpOption, DhcpOptions, OptionCode};
pub use packet::DhcpPacket;
pub use registry::Enumeration;
