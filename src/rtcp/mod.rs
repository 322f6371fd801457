pub mod common_header;
pub mod demuxer;
pub mod full_intra_request;
pub mod packet_type;
pub mod picture_loss;
#[allow(clippy::module_inception)]
pub mod rtcp;
pub mod rtcp_error;

pub use common_header::CommonHeader;
pub use demuxer::FeedbackDemuxer;
pub use full_intra_request::{FirEntry, FullIntraRequest};
pub use packet_type::RtcpPacketType;
pub use picture_loss::PictureLossIndication;
pub use rtcp::RtcpPacket;
pub use rtcp_error::RtcpError;
