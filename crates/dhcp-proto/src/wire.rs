//! Bounds-checked primitives shared by the packet and option codecs.

use std::net::Ipv4Addr;

use bytes::{Buf, BufMut};

use crate::{OptionCode, ProtoError, Result};

/// Cursor over an untrusted datagram. Every read checks the remaining length
/// first, so a short buffer yields `TruncatedBuffer` instead of a panic.
pub(crate) struct Reader<'a> {
    len: usize,
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            len: data.len(),
            buf: data,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.len - self.buf.remaining()
    }

    pub(crate) fn ensure(&self, needed: usize, what: &'static str) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(ProtoError::TruncatedBuffer {
                what,
                offset: self.offset(),
            });
        }
        Ok(())
    }

    pub(crate) fn u8(&mut self, what: &'static str) -> Result<u8> {
        self.ensure(1, what)?;
        Ok(self.buf.get_u8())
    }

    pub(crate) fn u16(&mut self, what: &'static str) -> Result<u16> {
        self.ensure(2, what)?;
        Ok(self.buf.get_u16())
    }

    pub(crate) fn u32(&mut self, what: &'static str) -> Result<u32> {
        self.ensure(4, what)?;
        Ok(self.buf.get_u32())
    }

    pub(crate) fn ipv4(&mut self, what: &'static str) -> Result<Ipv4Addr> {
        self.u32(what).map(Ipv4Addr::from)
    }

    pub(crate) fn bytes(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        self.ensure(n, what)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn skip(&mut self, n: usize, what: &'static str) -> Result<()> {
        self.ensure(n, what)?;
        self.buf.advance(n);
        Ok(())
    }
}

pub(crate) fn put_ipv4<B: BufMut>(dst: &mut B, addr: Ipv4Addr) {
    dst.put_slice(&addr.octets());
}

/// Validates an option payload length against `max` and the 1-byte length
/// field.
pub(crate) fn option_length(option: OptionCode, len: usize, max: usize) -> Result<u8> {
    let max = max.min(u8::MAX as usize);
    if len > max {
        return Err(ProtoError::OptionTooLarge { option, len, max });
    }
    Ok(len as u8)
}

/// Payload of an IPv4-valued option, if it has the expected 4-byte shape.
pub(crate) fn ipv4_payload(data: &[u8]) -> Option<Ipv4Addr> {
    <[u8; 4]>::try_from(data).ok().map(Ipv4Addr::from)
}
