use thiserror::Error;

use crate::OptionCode;

pub type Result<T> = std::result::Result<T, ProtoError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    #[error("required field '{0}' is missing")]
    MissingRequiredField(&'static str),

    #[error("hardware address malformed: {0}")]
    MalformedHardwareAddress(String),

    #[error("option {option} too large: {len} bytes (max {max})")]
    OptionTooLarge {
        option: OptionCode,
        len: usize,
        max: usize,
    },

    #[error("invalid magic cookie {0:#010x}")]
    InvalidMagicCookie(u32),

    #[error("buffer truncated while reading {what} at offset {offset}")]
    TruncatedBuffer { what: &'static str, offset: usize },

    #[error("value {value} is not a known {set}")]
    UnrecognizedEnumValue { set: &'static str, value: u8 },
}
