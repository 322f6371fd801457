use std::sync::Arc;

use bytes::Bytes;

use crate::{
    config::{CodecConfig, Config},
    log::{NoopLogSink, log_sink::LogSink},
    sink_debug, sink_trace, sink_warn,
};

use super::{
    common_header::CommonHeader,
    packet_type::{RTCP_VERSION, packet_type_name},
    rtcp::RtcpPacket,
    rtcp_error::RtcpError,
};

/// Entry point for transport code: turns one received RTCP packet into a
/// typed [`RtcpPacket`] and back.
///
/// Holds no per-packet state, so one instance can be shared across threads.
pub struct FeedbackDemuxer {
    config: CodecConfig,
    sink: Arc<dyn LogSink>,
}

impl FeedbackDemuxer {
    pub fn new(config: CodecConfig) -> Self {
        Self::with_sink(config, Arc::new(NoopLogSink))
    }

    pub fn with_sink(config: CodecConfig, sink: Arc<dyn LogSink>) -> Self {
        Self { config, sink }
    }

    /// Reads the `[Rtcp]` section. `log_level` is not applied to `sink`;
    /// callers pass it to the sink they build (e.g. `LoggerHandle::channel`).
    pub fn from_config(config: &Config, sink: Arc<dyn LogSink>) -> Self {
        Self::with_sink(CodecConfig::from_config(config), sink)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decodes `raw`, dispatching on the header's (type, format) pair.
    #[cfg_attr(not(feature = "log-debug"), allow(unused_variables))]
    pub fn demux(&self, raw: &[u8]) -> Result<RtcpPacket, RtcpError> {
        let result = self.decode(raw);
        match &result {
            Ok(pkt) => sink_debug!(self.sink, "[RTCP] decoded {pkt}"),
            Err(RtcpError::UnknownPacketType { pt, fmt }) => sink_warn!(
                self.sink,
                "[RTCP] unsupported packet {} (pt={pt}) fmt={fmt}",
                packet_type_name(*pt)
            ),
            Err(e) => sink_warn!(self.sink, "[RTCP] dropping {} byte packet: {e}", raw.len()),
        }
        result
    }

    fn decode(&self, raw: &[u8]) -> Result<RtcpPacket, RtcpError> {
        let hdr = CommonHeader::unmarshal(raw)?;
        if self.config.strict_version && hdr.version() != RTCP_VERSION {
            return Err(RtcpError::BadVersion(hdr.version()));
        }

        let declared = hdr.total_len();
        if raw.len() > declared {
            if self.config.reject_trailing_bytes {
                return Err(RtcpError::LengthMismatch {
                    declared,
                    actual: raw.len(),
                });
            }
            sink_warn!(
                self.sink,
                "[RTCP] ignoring {} bytes past declared length {declared}",
                raw.len() - declared
            );
        }

        RtcpPacket::unmarshal_with(&hdr, raw)
    }

    /// Encodes `packet` for the transport.
    pub fn mux(&self, packet: &RtcpPacket) -> Result<Bytes, RtcpError> {
        let out = packet.to_bytes()?;
        sink_trace!(self.sink, "[RTCP] encoded {packet} ({} bytes)", out.len());
        Ok(out)
    }
}
