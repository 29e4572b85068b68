//! UDP transport for the DHCP codec: client and server endpoints, message
//! builders and classification of received packets.

pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod messages;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use dispatch::{ClientEvent, ClientRole, Role, ServerEvent, ServerRole};
pub use endpoint::{DhcpClient, DhcpServer, Endpoint, SendOptions};
pub use error::TransportError;
pub use messages::{create_discover_packet, create_offer_packet, DiscoverRequest, OfferRequest};

// Re-export types from dhcp-proto
pub use dhcp_proto::{DhcpOption, DhcpOptions, DhcpPacket, HardwareAddress, MessageType};
