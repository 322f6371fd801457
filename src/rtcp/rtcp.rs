use std::fmt;

use bytes::Bytes;

use super::{
    common_header::CommonHeader,
    full_intra_request::FullIntraRequest,
    packet_type::{FORMAT_FIR, FORMAT_PLI, PT_PSFB, RtcpPacketType},
    picture_loss::PictureLossIndication,
    rtcp_error::RtcpError,
};

/// The union of supported RTCP feedback packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtcpPacket {
    Pli(PictureLossIndication), // Payload FB (206/FMT=1)
    Fir(FullIntraRequest),      // Payload FB (206/FMT=4)
}

pub type DecodeFn = fn(&[u8]) -> Result<RtcpPacket, RtcpError>;

/// (packet type, format) -> decoder.
const DECODERS: &[(u8, u8, DecodeFn)] = &[
    (PT_PSFB, FORMAT_PLI, decode_pli),
    (PT_PSFB, FORMAT_FIR, decode_fir),
];

fn decode_pli(raw: &[u8]) -> Result<RtcpPacket, RtcpError> {
    PictureLossIndication::unmarshal(raw).map(RtcpPacket::Pli)
}

fn decode_fir(raw: &[u8]) -> Result<RtcpPacket, RtcpError> {
    FullIntraRequest::unmarshal(raw).map(RtcpPacket::Fir)
}

/// Looks up the decoder registered for a header's (type, format) pair.
pub fn decoder_for(hdr: &CommonHeader) -> Option<DecodeFn> {
    DECODERS
        .iter()
        .find(|(pt, fmt, _)| *pt == hdr.pt() && *fmt == hdr.count())
        .map(|(_, _, decode)| *decode)
}

impl RtcpPacket {
    /// Decodes with an already parsed header of `raw`.
    pub(crate) fn unmarshal_with(hdr: &CommonHeader, raw: &[u8]) -> Result<Self, RtcpError> {
        match decoder_for(hdr) {
            Some(decode) => decode(raw),
            None => Err(RtcpError::UnknownPacketType {
                pt: hdr.pt(),
                fmt: hdr.count(),
            }),
        }
    }

    /// Encoded packet, ready to hand to a transport.
    pub fn to_bytes(&self) -> Result<Bytes, RtcpError> {
        self.marshal().map(Bytes::from)
    }

    fn inner(&self) -> &dyn RtcpPacketType {
        match self {
            RtcpPacket::Pli(pli) => pli,
            RtcpPacket::Fir(fir) => fir,
        }
    }
}

impl RtcpPacketType for RtcpPacket {
    fn marshal_size(&self) -> usize {
        self.inner().marshal_size()
    }

    fn header(&self) -> CommonHeader {
        self.inner().header()
    }

    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize, RtcpError> {
        self.inner().marshal_to(buf)
    }

    /// Decodes a single packet, choosing the variant from its header.
    fn unmarshal(raw: &[u8]) -> Result<Self, RtcpError> {
        let hdr = CommonHeader::unmarshal(raw)?;
        Self::unmarshal_with(&hdr, raw)
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        self.inner().destination_ssrc()
    }
}

impl fmt::Display for RtcpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcpPacket::Pli(pli) => write!(f, "{pli}"),
            RtcpPacket::Fir(fir) => write!(f, "{fir}"),
        }
    }
}

impl From<PictureLossIndication> for RtcpPacket {
    fn from(pli: PictureLossIndication) -> Self {
        RtcpPacket::Pli(pli)
    }
}

impl From<FullIntraRequest> for RtcpPacket {
    fn from(fir: FullIntraRequest) -> Self {
        RtcpPacket::Fir(fir)
    }
}
