use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::rtcp::{
    common_header::CommonHeader,
    packet_type::{
        FORMAT_FIR, HEADER_LENGTH, PT_PSFB, RtcpPacketType, SSRC_LENGTH, ensure_capacity,
    },
    rtcp_error::RtcpError,
};

/// Byte offset of the first FCI entry.
const FIR_OFFSET: usize = HEADER_LENGTH + SSRC_LENGTH * 2;
const FIR_ENTRY_LENGTH: usize = 8;
/// Largest entry count whose packet length still fits the 16-bit length field.
pub const MAX_FIR_ENTRIES: usize =
    ((u16::MAX as usize + 1) * 4 - FIR_OFFSET) / FIR_ENTRY_LENGTH;

/// One FCI record: the target stream and the command sequence number.
///
/// On the wire each entry takes 8 bytes, the last 3 reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirEntry {
    pub ssrc: u32,
    pub sequence_number: u8,
}

impl FirEntry {
    pub fn new(ssrc: u32, sequence_number: u8) -> Self {
        Self {
            ssrc,
            sequence_number,
        }
    }
}

// Feedback: FIR (PSFB, FMT=4), RFC5104 §4.3.1
/// Reliable request for an intra frame. Loss recovery should use
/// [`PictureLossIndication`](super::picture_loss::PictureLossIndication)
/// instead.
///
/// Entries are kept in wire order; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FullIntraRequest {
    pub sender_ssrc: u32,
    pub media_ssrc: u32,
    pub entries: Vec<FirEntry>,
}

impl FullIntraRequest {
    pub fn new(sender_ssrc: u32, media_ssrc: u32, entries: Vec<FirEntry>) -> Self {
        Self {
            sender_ssrc,
            media_ssrc,
            entries,
        }
    }

    pub fn push(&mut self, ssrc: u32, sequence_number: u8) {
        self.entries.push(FirEntry::new(ssrc, sequence_number));
    }
}

impl RtcpPacketType for FullIntraRequest {
    fn marshal_size(&self) -> usize {
        FIR_OFFSET + self.entries.len() * FIR_ENTRY_LENGTH
    }

    /// Past [`MAX_FIR_ENTRIES`] the length no longer fits 16 bits and is
    /// clamped to `u16::MAX`; `marshal_to` refuses such packets instead.
    fn header(&self) -> CommonHeader {
        let words = self.marshal_size() / 4 - 1;
        let length = u16::try_from(words).unwrap_or(u16::MAX);
        CommonHeader::with_length(FORMAT_FIR, PT_PSFB, false, length)
    }

    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize, RtcpError> {
        if self.entries.len() > MAX_FIR_ENTRIES {
            return Err(RtcpError::TooManyEntries(self.entries.len()));
        }
        let size = self.marshal_size();
        ensure_capacity(buf, size)?;
        self.header().marshal_to(buf)?;

        BigEndian::write_u32(&mut buf[HEADER_LENGTH..HEADER_LENGTH + 4], self.sender_ssrc);
        BigEndian::write_u32(&mut buf[HEADER_LENGTH + 4..FIR_OFFSET], self.media_ssrc);

        for (entry, chunk) in self
            .entries
            .iter()
            .zip(buf[FIR_OFFSET..size].chunks_exact_mut(FIR_ENTRY_LENGTH))
        {
            BigEndian::write_u32(&mut chunk[0..4], entry.ssrc);
            chunk[4] = entry.sequence_number;
            chunk[5..8].fill(0);
        }
        Ok(size)
    }

    /// The entry count comes from the header's length field, so bytes past
    /// the declared end never turn into entries. Reserved bytes are not checked.
    fn unmarshal(raw: &[u8]) -> Result<Self, RtcpError> {
        if raw.len() < FIR_OFFSET {
            return Err(RtcpError::PacketTooShort);
        }
        let hdr = CommonHeader::unmarshal(raw)?;
        let end = hdr.total_len();
        if raw.len() < end {
            return Err(RtcpError::PacketTooShort);
        }
        if hdr.pt() != PT_PSFB || hdr.count() != FORMAT_FIR {
            return Err(RtcpError::WrongType);
        }

        let sender_ssrc = BigEndian::read_u32(&raw[HEADER_LENGTH..HEADER_LENGTH + 4]);
        let media_ssrc = BigEndian::read_u32(&raw[HEADER_LENGTH + 4..FIR_OFFSET]);

        // A declared length below the fixed body just means "no entries".
        let fci = raw.get(FIR_OFFSET..end).unwrap_or_default();
        if fci.len() % FIR_ENTRY_LENGTH != 0 {
            return Err(RtcpError::PacketTooShort);
        }
        let entries = fci
            .chunks_exact(FIR_ENTRY_LENGTH)
            .map(|chunk| FirEntry::new(BigEndian::read_u32(&chunk[0..4]), chunk[4]))
            .collect();

        Ok(Self {
            sender_ssrc,
            media_ssrc,
            entries,
        })
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.ssrc).collect()
    }
}

impl fmt::Display for FullIntraRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FullIntraRequest {:x} {:x}",
            self.sender_ssrc, self.media_ssrc
        )?;
        for e in &self.entries {
            write!(f, " ({:x} {})", e.ssrc, e.sequence_number)?;
        }
        Ok(())
    }
}
