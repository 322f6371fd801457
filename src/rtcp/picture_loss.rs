use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::rtcp::{
    common_header::CommonHeader,
    packet_type::{
        FORMAT_PLI, HEADER_LENGTH, PT_PSFB, RtcpPacketType, SSRC_LENGTH, ensure_capacity,
    },
    rtcp_error::RtcpError,
};

/// PLI carries no FCI, so the length field is always 2.
const PLI_LENGTH: u16 = 2;
const PLI_SIZE: usize = HEADER_LENGTH + SSRC_LENGTH * 2;

// Feedback: PLI (PSFB, FMT=1), RFC4585 §6.3.1
/// Tells the encoder that an undefined amount of coded video belonging to one
/// or more pictures was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PictureLossIndication {
    /// SSRC of the packet sender.
    pub sender_ssrc: u32,
    /// SSRC of the source where the loss was experienced.
    pub media_ssrc: u32,
}

impl PictureLossIndication {
    pub fn new(sender_ssrc: u32, media_ssrc: u32) -> Self {
        Self {
            sender_ssrc,
            media_ssrc,
        }
    }
}

impl RtcpPacketType for PictureLossIndication {
    fn marshal_size(&self) -> usize {
        PLI_SIZE
    }

    fn header(&self) -> CommonHeader {
        CommonHeader::with_length(FORMAT_PLI, PT_PSFB, false, PLI_LENGTH)
    }

    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize, RtcpError> {
        ensure_capacity(buf, PLI_SIZE)?;
        self.header().marshal_to(buf)?;
        let body = &mut buf[HEADER_LENGTH..PLI_SIZE];
        BigEndian::write_u32(&mut body[0..4], self.sender_ssrc);
        BigEndian::write_u32(&mut body[4..8], self.media_ssrc);
        Ok(PLI_SIZE)
    }

    /// The declared length is not cross-checked against the body; any
    /// bytes past the two SSRCs are ignored.
    fn unmarshal(raw: &[u8]) -> Result<Self, RtcpError> {
        if raw.len() < PLI_SIZE {
            return Err(RtcpError::PacketTooShort);
        }
        let hdr = CommonHeader::unmarshal(raw)?;
        if hdr.pt() != PT_PSFB || hdr.count() != FORMAT_PLI {
            return Err(RtcpError::WrongType);
        }
        let body = &raw[HEADER_LENGTH..PLI_SIZE];
        Ok(Self {
            sender_ssrc: BigEndian::read_u32(&body[0..4]),
            media_ssrc: BigEndian::read_u32(&body[4..8]),
        })
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.media_ssrc]
    }
}

impl fmt::Display for PictureLossIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PictureLossIndication {:x} {:x}",
            self.sender_ssrc, self.media_ssrc
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::rtcp::packet_type::FORMAT_FIR;

    #[test]
    fn marshal_matches_wire_layout() {
        let pli = PictureLossIndication::new(0xDEAD_BEEF, 0xCAFE_BABE);
        let raw = pli.marshal().unwrap();
        assert_eq!(
            raw,
            vec![
                0x81, 0xCE, 0x00, 0x02, // v=2, fmt=1, pt=206, len=2
                0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE, 0xBA, 0xBE,
            ]
        );
        assert_eq!(raw.len(), pli.marshal_size());
    }

    #[test]
    fn header_length_is_fixed() {
        let hdr = PictureLossIndication::new(1, 2).header();
        assert_eq!(hdr.pt(), PT_PSFB);
        assert_eq!(hdr.count(), FORMAT_PLI);
        assert_eq!(hdr.length_words(), 2);
        assert_eq!(hdr.total_len(), PLI_SIZE);
    }

    #[test]
    fn unmarshal_reads_both_ssrcs() {
        let raw = [
            0x81, 0xCE, 0x00, 0x02, 0x90, 0x2F, 0x9E, 0x2E, 0x90, 0x2F, 0x9E, 0x2E,
        ];
        let pli = PictureLossIndication::unmarshal(&raw).unwrap();
        assert_eq!(pli, PictureLossIndication::new(0x902F_9E2E, 0x902F_9E2E));
    }

    #[test]
    fn unmarshal_ignores_trailing_bytes() {
        let mut raw = PictureLossIndication::new(7, 9).marshal().unwrap();
        raw.extend_from_slice(&[0xFF; 8]);
        let pli = PictureLossIndication::unmarshal(&raw).unwrap();
        assert_eq!(pli, PictureLossIndication::new(7, 9));
    }

    #[test]
    fn every_truncation_is_too_short() {
        let raw = PictureLossIndication::new(1, 2).marshal().unwrap();
        for n in 0..raw.len() {
            assert_eq!(
                PictureLossIndication::unmarshal(&raw[..n]),
                Err(RtcpError::PacketTooShort),
                "length {n}"
            );
        }
    }

    #[test]
    fn wrong_format_or_type_is_rejected() {
        let mut raw = PictureLossIndication::new(1, 2).marshal().unwrap();
        raw[0] = 0x80 | FORMAT_FIR;
        assert_eq!(
            PictureLossIndication::unmarshal(&raw),
            Err(RtcpError::WrongType)
        );

        let mut raw = PictureLossIndication::new(1, 2).marshal().unwrap();
        raw[1] = 205;
        assert_eq!(
            PictureLossIndication::unmarshal(&raw),
            Err(RtcpError::WrongType)
        );
    }

    #[test]
    fn marshal_to_undersized_buffer_fails() {
        let pli = PictureLossIndication::new(1, 2);
        let mut buf = [0u8; 11];
        assert_eq!(
            pli.marshal_to(&mut buf),
            Err(RtcpError::BufferTooSmall {
                needed: 12,
                available: 11
            })
        );
        assert_eq!(buf, [0u8; 11]);
    }

    #[test]
    fn encode_into_appends_after_existing_bytes() {
        let mut out = vec![0xAA];
        PictureLossIndication::new(1, 2).encode_into(&mut out).unwrap();
        assert_eq!(out.len(), 13);
        assert_eq!(out[0], 0xAA);
        assert_eq!(&out[1..5], &[0x81, 0xCE, 0x00, 0x02]);
    }

    #[test]
    fn destination_is_media_ssrc() {
        let pli = PictureLossIndication::new(0x1111, 0x2222);
        assert_eq!(pli.destination_ssrc(), vec![0x2222]);
    }

    #[test]
    fn display_is_hex_summary() {
        let pli = PictureLossIndication::new(0xDEAD_BEEF, 0xCAFE_BABE);
        assert_eq!(pli.to_string(), "PictureLossIndication deadbeef cafebabe");
    }
}
