//! # MPX/RDS Error Handling
//!
//! This module defines the `MpxError` enum, which represents the error
//! types that can occur while constructing or operating an MPX/RDS stream.
//!
//! `UnderrunWarning` and `PayloadTruncation` are deliberately not variants
//! here: both are non-fatal per the error-handling contract and are
//! represented instead as counters (see [`crate::instrumentation::stats`])
//! plus a log line at the point they occur.

use thiserror::Error;

/// Errors that can occur while configuring or driving an MPX/RDS stream.
#[derive(Debug, Error)]
pub enum MpxError {
    /// The requested sample rate yields fewer than the minimum 4
    /// samples per RDS symbol; the BPSK modulator cannot operate.
    #[error("sample rate {fs} Hz gives {sps:.2} samples/symbol, below the minimum of 4.0")]
    SampleRateTooLow { fs: f64, sps: f64 },

    /// A logo raster exceeded the maximum encodable dimensions.
    #[error("logo dimensions {width}x{height} exceed the maximum of 64x32")]
    LogoDimensionsOutOfRange { width: u32, height: u32 },

    /// A logo raster had a zero dimension.
    #[error("logo dimensions must be non-zero, got {width}x{height}")]
    LogoDimensionsZero { width: u32, height: u32 },

    /// A character outside Latin-1 (code point > 0xFF) was supplied for
    /// a PS/RT/logo field; the core has no wider character-set mapping.
    #[error("character {0:?} (U+{:04X}) is outside the supported Latin-1 range", *.0 as u32)]
    UnsupportedCharacter(char),

    /// The sink (audio driver, file writer, ...) stopped accepting
    /// blocks. The producer finishes its current block and exits;
    /// this variant is surfaced to the caller driving the stream so it
    /// can react (e.g. join the producer thread).
    #[error("sink closed; no further blocks will be accepted")]
    SinkClosed,

    /// I/O failure underneath a sink implementation (e.g. `hound`
    /// writing to disk).
    #[error("sink I/O error: {0}")]
    SinkIo(String),

    /// A catch-all for conditions that don't fit the above.
    #[error("{0}")]
    Other(String),
}
