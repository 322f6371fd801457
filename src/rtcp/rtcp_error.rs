use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtcpError {
    /// Input shorter than the header, the fixed body or the declared length.
    PacketTooShort,
    /// Header (type, format) does not belong to the decoding variant.
    WrongType,
    BadVersion(u8),
    /// Destination buffer cannot hold the rendered packet.
    BufferTooSmall {
        needed: usize,
        available: usize,
    },
    TooManyEntries(usize),
    InvalidCount(u8),
    UnknownPacketType {
        pt: u8,
        fmt: u8,
    },
    LengthMismatch {
        declared: usize,
        actual: usize,
    },
}

impl fmt::Display for RtcpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RtcpError::*;
        match self {
            PacketTooShort => write!(f, "packet too short"),
            WrongType => write!(f, "wrong packet type"),
            BadVersion(v) => write!(f, "bad RTCP version: {v}"),
            BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed} bytes, have {available}")
            }
            TooManyEntries(n) => write!(f, "too many entries for a single packet: {n}"),
            InvalidCount(c) => write!(f, "count/format does not fit in 5 bits: {c}"),
            UnknownPacketType { pt, fmt: format } => {
                write!(f, "unknown RTCP packet type: pt={pt} fmt={format}")
            }
            LengthMismatch { declared, actual } => write!(
                f,
                "declared length {declared} does not match buffer length {actual}"
            ),
        }
    }
}
impl std::error::Error for RtcpError {}
