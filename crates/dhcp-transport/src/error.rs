use dhcp_proto::ProtoError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("DHCP protocol error: {0}")]
    Protocol(#[from] ProtoError),
}

pub type Result<T> = std::result::Result<T, TransportError>;
