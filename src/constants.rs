//! Normative constants for MPX/RDS synthesis.
//!
//! Frequencies, the RDS CRC polynomial, offset words, default injection
//! levels, and filter design parameters, all taken from the external
//! interface contract. Nothing here is tunable per-stream; per-stream
//! knobs live in [`crate::config`].

/// 19 kHz stereo pilot tone frequency.
pub const PILOT_HZ: f64 = 19_000.0;

/// 38 kHz DSB-SC stereo subcarrier frequency (2x pilot).
pub const STEREO_SUBCARRIER_HZ: f64 = 38_000.0;

/// Primary RDS subcarrier frequency (3x pilot).
pub const RDS0_HZ: f64 = 57_000.0;

/// Experimental RDS2 side-subcarrier frequencies.
pub const RDS2_SUBCARRIER_HZ: [f64; 3] = [66_500.0, 76_000.0, 85_500.0];

/// RDS bit rate in bits/second.
pub const RDS_BITRATE: f64 = 1187.5;

/// RDS CRC generator polynomial, x^10 + x^8 + x^7 + x^5 + x^4 + x^3 + 1.
pub const RDS_CRC_POLY: u16 = 0x5B9;

/// Width of the CRC register / checkword, in bits.
pub const RDS_CRC_BITS: u32 = 10;

/// Width of a block's data word, in bits.
pub const RDS_DATA_BITS: u32 = 16;

/// Width of one RDS block (data + checkword), in bits.
pub const RDS_BLOCK_BITS: u32 = RDS_DATA_BITS + RDS_CRC_BITS;

/// Width of one RDS group (four blocks), in bits.
pub const RDS_GROUP_BITS: u32 = RDS_BLOCK_BITS * 4;

/// Offset word for block position A.
pub const OFFSET_A: u16 = 0x0FC;
/// Offset word for block position B.
pub const OFFSET_B: u16 = 0x198;
/// Offset word for block position C (unprimed only; no C' in this core).
pub const OFFSET_C: u16 = 0x168;
/// Offset word for block position D.
pub const OFFSET_D: u16 = 0x1B4;

/// Default pilot injection level (linear voltage ratio).
pub const DEFAULT_PILOT_LEVEL: f32 = 0.08;
/// Default RDS (57 kHz) injection level.
pub const DEFAULT_RDS_LEVEL: f32 = 0.03;
/// Default per-carrier RDS2 injection level.
pub const DEFAULT_RDS2_LEVEL: f32 = 0.01;

/// Audio low-pass band-limit frequency.
pub const AUDIO_LPF_HZ: f64 = 15_000.0;
/// Tap count of the audio band-limit FIR.
pub const AUDIO_LPF_TAPS: usize = 513;

/// Raised-cosine roll-off factor.
pub const RC_BETA: f64 = 0.5;
/// Minimum raised-cosine pulse span, in symbols.
pub const RC_MIN_SPAN_SYMBOLS: usize = 6;
/// Minimum raised-cosine tap count regardless of span/sps.
pub const RC_MIN_TAPS: usize = 41;

/// Minimum samples-per-symbol the BPSK modulator will accept.
pub const MIN_SPS: f64 = 4.0;

/// PS field length, in characters, after space-padding/truncation.
pub const PS_LEN: usize = 8;
/// RT field length, in characters, after space-padding/truncation.
pub const RT_LEN: usize = 64;

/// Maximum clip magnitude applied to the composed MPX signal.
pub const MPX_CLIP: f32 = 0.999;

/// Logo frame magic byte.
pub const LOGO_MAGIC: u8 = 0xA7;
/// Maximum logo raster width.
pub const LOGO_MAX_WIDTH: u32 = 64;
/// Maximum logo raster height.
pub const LOGO_MAX_HEIGHT: u32 = 32;

/// Headroom, in bits, added to the producer's per-block bit request
/// to absorb rounding and BPSK edge effects (two groups' worth).
pub const BIT_REQUEST_HEADROOM: usize = 208;

/// Capacity, in blocks, of the bounded channel between the producer
/// task and the real-time audio callback.
pub const STREAM_QUEUE_CAPACITY: usize = 8;
