//! # mpx-rds — FM Composite Baseband Synthesizer with RDS/RDS2
//!
//! `mpx-rds` synthesizes an FM broadcast composite baseband (MPX) signal
//! carrying a stereo audio program together with a Radio Data System
//! (RDS) digital subcarrier and, optionally, experimental RDS2
//! side-subcarriers. The output is a single-channel `f32` waveform at a
//! caller-chosen sample rate (typically 192 kHz), suitable for delivery
//! to an audio interface driving an FM exciter, or for serialization to
//! a PCM file.
//!
//! ## Features
//!
//! - RDS group construction (0A Program Service, 2A RadioText) with the
//!   10-bit shortened-cyclic checkword and four fixed offset words
//! - A stateful bitstream generator interleaving PS, RT, and an
//!   opportunistic logo payload into one continuous bit sequence
//! - Differentially-encoded BPSK modulation with raised-cosine pulse
//!   shaping onto 57 kHz (and optionally 66.5/76/85.5 kHz) subcarriers
//! - A full MPX composer: 15 kHz audio band-limiting, L±R formation,
//!   19 kHz pilot, 38 kHz DSB-SC stereo subcarrier, RDS bus summation
//! - A producer/consumer streaming driver wired for real-time audio
//!   callbacks with bounded backpressure and graceful cancellation
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mpx-rds = "0.1.0"
//! ```
//!
//! ```rust
//! use mpx_rds::config::{MpxConfig, RdsConfig, StreamConfig};
//! use mpx_rds::rds::bitstream::BitstreamGenerator;
//!
//! # fn main() -> Result<(), mpx_rds::MpxError> {
//! let rds = RdsConfig::new(0x1234, "TESTFM");
//! let mpx = MpxConfig::default();
//! let config = StreamConfig::new(rds.clone(), mpx);
//!
//! let mut gen = BitstreamGenerator::new(rds)?;
//! let bits = gen.generate(104);
//! assert_eq!(bits.len(), 104);
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod dsp;
pub mod error;
pub mod instrumentation;
pub mod logging;
pub mod rds;
pub mod sinks;
pub mod streaming;
pub mod util;

pub use crate::config::{MpxConfig, RdsConfig, StreamConfig};
pub use crate::error::MpxError;
pub use crate::logging::{init_logger, log_info};
pub use crate::rds::bitstream::BitstreamGenerator;
pub use crate::streaming::driver::StreamingDriver;
