use std::fmt;

use super::{common_header::CommonHeader, rtcp_error::RtcpError};

pub const RTCP_VERSION: u8 = 2;
pub const HEADER_LENGTH: usize = 4;
pub const SSRC_LENGTH: usize = 4;

// RTCP packet types (per RFC3550; feedback per RFC4585/5104)
pub const PT_SR: u8 = 200;
pub const PT_RR: u8 = 201;
pub const PT_SDES: u8 = 202;
pub const PT_BYE: u8 = 203;
pub const PT_APP: u8 = 204;
pub const PT_RTPFB: u8 = 205; // Transport layer FB (e.g., Generic NACK)
pub const PT_PSFB: u8 = 206; // Payload-specific FB (e.g., PLI, FIR)

// Payload-specific feedback formats (FMT field), RFC4585 §6.3 / RFC5104 §4.3
pub const FORMAT_PLI: u8 = 1;
pub const FORMAT_FIR: u8 = 4;

/// Capabilities shared by every concrete RTCP packet.
///
/// `Display` gives a one-line summary meant for logs; it is not parsed back.
pub trait RtcpPacketType: fmt::Display {
    /// Exact number of bytes `marshal_to` writes for the current contents.
    fn marshal_size(&self) -> usize;

    /// Header consistent with the current contents.
    fn header(&self) -> CommonHeader;

    /// Writes header and body at the start of `buf`, returning the bytes written.
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize, RtcpError>;

    /// Decodes a whole packet (header + body).
    fn unmarshal(raw: &[u8]) -> Result<Self, RtcpError>
    where
        Self: Sized;

    /// SSRCs this packet is about, used for routing.
    fn destination_ssrc(&self) -> Vec<u32>;

    fn marshal(&self) -> Result<Vec<u8>, RtcpError> {
        let mut buf = vec![0u8; self.marshal_size()];
        let n = self.marshal_to(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Appends the encoded packet to `out`. On error `out` is left as it was.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), RtcpError> {
        let start = out.len();
        out.resize(start + self.marshal_size(), 0);
        match self.marshal_to(&mut out[start..]) {
            Ok(n) => {
                out.truncate(start + n);
                Ok(())
            }
            Err(e) => {
                out.truncate(start);
                Err(e)
            }
        }
    }
}

/// Fails unless `buf` can hold `needed` bytes.
pub(crate) fn ensure_capacity(buf: &[u8], needed: usize) -> Result<(), RtcpError> {
    if buf.len() < needed {
        return Err(RtcpError::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

/// Short name for a packet type, for log lines.
pub fn packet_type_name(pt: u8) -> &'static str {
    match pt {
        PT_SR => "SR",
        PT_RR => "RR",
        PT_SDES => "SDES",
        PT_BYE => "BYE",
        PT_APP => "APP",
        PT_RTPFB => "RTPFB",
        PT_PSFB => "PSFB",
        _ => "unknown",
    }
}
