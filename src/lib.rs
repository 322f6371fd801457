//! Codec for RTCP feedback packets (RFC 4585 / RFC 5104).
//!
//! Converts between typed packets and their exact wire bytes: the common
//! RTCP header plus a type-specific body. Two payload-specific feedback
//! messages are supported:
//! - Picture Loss Indication (PLI), a fixed-size body.
//! - Full Intra Request (FIR), a body of repeated 8-byte entries.
//!
//! Transport, session negotiation and compound packets are left to the caller.

/// Configuration file loading and codec options.
pub mod config;
/// Logging utilities for the codec.
pub mod log;
/// RTCP header and feedback packet parsing and building.
pub mod rtcp;
