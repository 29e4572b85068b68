use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Configuration structure loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Local address the endpoint binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: Ipv4Addr,

    /// Destination of broadcast packets
    #[serde(default = "default_broadcast_address")]
    pub broadcast_address: Ipv4Addr,

    /// UDP port of DHCP servers
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// UDP port of DHCP clients
    #[serde(default = "default_client_port")]
    pub client_port: u16,

    /// How long `discover` waits for a reply, in seconds
    #[serde(default = "default_reply_timeout")]
    pub reply_timeout_secs: u64,
}

fn default_bind_address() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

fn default_broadcast_address() -> Ipv4Addr {
    Ipv4Addr::BROADCAST
}

fn default_server_port() -> u16 {
    67
}

fn default_client_port() -> u16 {
    68
}

fn default_reply_timeout() -> u64 {
    5
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(contents)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            broadcast_address: default_broadcast_address(),
            server_port: default_server_port(),
            client_port: default_client_port(),
            reply_timeout_secs: default_reply_timeout(),
        }
    }
}
