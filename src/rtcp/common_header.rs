use byteorder::{BigEndian, ByteOrder};

use super::{
    packet_type::{HEADER_LENGTH, RTCP_VERSION},
    rtcp_error::RtcpError,
};

const COUNT_MASK: u8 = 0x1F;

/// RTCP common header (RFC 3550 §6.4.1), 4 bytes on the wire:
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|  count  |      PT       |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Packets never store one of these; they build it on demand from their
/// current contents so `length` always agrees with the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    version: u8,       // 2
    padding: bool,     // P
    count: u8,         // 5 bits (report count or FMT)
    pt: u8,            // packet type
    length_words: u16, // number of 32-bit words minus one
}

impl CommonHeader {
    pub fn new(count: u8, pt: u8, padding: bool) -> Self {
        Self::with_length(count, pt, padding, 0)
    }

    pub fn with_length(count: u8, pt: u8, padding: bool, length_words: u16) -> Self {
        Self {
            version: RTCP_VERSION,
            padding,
            count,
            pt,
            length_words,
        }
    }

    /// Reads the first 4 bytes of `buf`. Only the size is checked; type and
    /// format legality belong to whichever packet decodes the body.
    pub fn unmarshal(buf: &[u8]) -> Result<Self, RtcpError> {
        if buf.len() < HEADER_LENGTH {
            return Err(RtcpError::PacketTooShort);
        }
        let vpc = buf[0];
        Ok(Self {
            version: vpc >> 6,
            padding: ((vpc >> 5) & 1) != 0,
            count: vpc & COUNT_MASK,
            pt: buf[1],
            length_words: BigEndian::read_u16(&buf[2..4]),
        })
    }

    pub fn marshal_to(&self, buf: &mut [u8]) -> Result<usize, RtcpError> {
        if buf.len() < HEADER_LENGTH {
            return Err(RtcpError::BufferTooSmall {
                needed: HEADER_LENGTH,
                available: buf.len(),
            });
        }
        if self.count > COUNT_MASK {
            return Err(RtcpError::InvalidCount(self.count));
        }
        buf[0] = ((self.version & 0b11) << 6) | ((self.padding as u8) << 5) | self.count;
        buf[1] = self.pt;
        BigEndian::write_u16(&mut buf[2..4], self.length_words);
        Ok(HEADER_LENGTH)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn padding(&self) -> bool {
        self.padding
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn pt(&self) -> u8 {
        self.pt
    }

    pub fn length_words(&self) -> u16 {
        self.length_words
    }

    /// Packet size in bytes implied by the length field, header included.
    pub fn total_len(&self) -> usize {
        (self.length_words as usize + 1) * 4
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::rtcp::packet_type::{FORMAT_FIR, FORMAT_PLI, PT_PSFB};

    #[test]
    fn marshal_writes_version_format_type_and_length() {
        let hdr = CommonHeader::with_length(FORMAT_PLI, PT_PSFB, false, 2);
        let mut buf = [0u8; 4];
        assert_eq!(hdr.marshal_to(&mut buf).unwrap(), 4);
        assert_eq!(buf, [0x81, 0xCE, 0x00, 0x02]);
    }

    #[test]
    fn unmarshal_reads_every_field() {
        let hdr = CommonHeader::unmarshal(&[0xA4, 0xCE, 0x01, 0x02]).unwrap();
        assert_eq!(hdr.version(), 2);
        assert!(hdr.padding());
        assert_eq!(hdr.count(), FORMAT_FIR);
        assert_eq!(hdr.pt(), PT_PSFB);
        assert_eq!(hdr.length_words(), 0x0102);
        assert_eq!(hdr.total_len(), (0x0102 + 1) * 4);
    }

    #[test]
    fn unmarshal_does_not_validate_version_or_type() {
        let hdr = CommonHeader::unmarshal(&[0x1F, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(hdr.version(), 0);
        assert_eq!(hdr.count(), 31);
        assert_eq!(hdr.pt(), 0);
    }

    #[test]
    fn unmarshal_short_buffer_fails() {
        for n in 0..HEADER_LENGTH {
            let buf = vec![0x81; n];
            assert_eq!(
                CommonHeader::unmarshal(&buf),
                Err(RtcpError::PacketTooShort)
            );
        }
    }

    #[test]
    fn marshal_into_short_buffer_fails() {
        let hdr = CommonHeader::new(FORMAT_PLI, PT_PSFB, false);
        let mut buf = [0u8; 3];
        assert_eq!(
            hdr.marshal_to(&mut buf),
            Err(RtcpError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn marshal_rejects_count_wider_than_five_bits() {
        let hdr = CommonHeader::new(32, PT_PSFB, false);
        let mut buf = [0u8; 4];
        assert_eq!(hdr.marshal_to(&mut buf), Err(RtcpError::InvalidCount(32)));
    }

    #[test]
    fn header_survives_marshal_unmarshal() {
        let hdr = CommonHeader::with_length(FORMAT_FIR, PT_PSFB, true, 65535);
        let mut buf = [0u8; 4];
        hdr.marshal_to(&mut buf).unwrap();
        assert_eq!(CommonHeader::unmarshal(&buf).unwrap(), hdr);
    }
}
