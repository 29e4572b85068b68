use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dhcp_proto::{DhcpOption, DhcpOptions, HardwareAddress};
use dhcp_transport::{
    create_discover_packet, ClientEvent, Config, DhcpClient, DhcpServer, DiscoverRequest,
    SendOptions, ServerEvent,
};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// DHCP transport - send and receive DHCP packets over UDP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/dhcp-transport/config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Listen as a server and log every classified packet
    Serve,

    /// Broadcast a DHCPDISCOVER and wait for one reply
    Discover {
        /// Client hardware address (aa:bb:cc:dd:ee:ff)
        #[arg(long)]
        chaddr: HardwareAddress,

        /// Transaction ID, decimal or 0x-prefixed hex
        #[arg(long, default_value = "0", value_parser = parse_xid)]
        xid: u32,

        /// Option codes to put in the parameter request list
        #[arg(long, value_delimiter = ',')]
        request: Vec<u8>,
    },
}

fn parse_xid(s: &str) -> Result<u32, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| format!("invalid transaction id '{}': {}", s, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dhcp_transport=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_file(&args.config) {
        Ok(cfg) => {
            info!("Loaded configuration from {}", args.config);
            cfg
        }
        Err(e) => {
            debug!("Failed to load configuration from {}: {}", args.config, e);
            info!("Using default configuration");
            Config::default()
        }
    };

    match args.command {
        Command::Serve => serve(&config).await,
        Command::Discover {
            chaddr,
            xid,
            request,
        } => discover(&config, chaddr, xid, request).await,
    }
}

async fn serve(config: &Config) -> Result<()> {
    let server = DhcpServer::bind(config)
        .await
        .with_context(|| {
            format!("failed to bind {}:{}", config.bind_address, config.server_port)
        })?;

    loop {
        let (event, src) = server.recv().await.context("DHCP receive failed")?;

        let packet = event.packet();
        let mac = packet
            .chaddr
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        match &event {
            ServerEvent::Unhandled { message_type, .. } => {
                warn!(
                    "Unhandled DHCP message type {:?} from {} ({})",
                    message_type, mac, src
                );
            }
            _ => {
                info!(
                    "{} from {} ({}) xid={:#010x}",
                    event.name(),
                    mac,
                    src,
                    packet.xid.unwrap_or_default()
                );
            }
        }
    }
}

async fn discover(
    config: &Config,
    chaddr: HardwareAddress,
    xid: u32,
    request: Vec<u8>,
) -> Result<()> {
    let client = DhcpClient::bind(config)
        .await
        .with_context(|| {
            format!("failed to bind {}:{}", config.bind_address, config.client_port)
        })?;

    let mut options = DhcpOptions::new();
    if !request.is_empty() {
        options.insert(DhcpOption::ParameterRequestList(request));
    }

    let bytes = create_discover_packet(DiscoverRequest {
        xid,
        chaddr,
        options,
    })?;
    client.broadcast_packet(&bytes, SendOptions::default()).await?;
    info!("DHCPDISCOVER sent, xid={:#010x}", xid);

    let timeout = Duration::from_secs(config.reply_timeout_secs);
    let (event, src) = tokio::time::timeout(timeout, client.recv())
        .await
        .context("no reply received")??;

    match &event {
        ClientEvent::Offer(packet) | ClientEvent::Ack(packet) => {
            info!("{} from {}: yiaddr={}", event.name(), src, packet.yiaddr);
        }
        ClientEvent::Nak(_) => warn!("{} from {}", event.name(), src),
        ClientEvent::Unhandled { message_type, .. } => {
            warn!("Unhandled DHCP message type {:?} from {}", message_type, src);
        }
    }

    Ok(())
}
