//! Stream configuration.
//!
//! `RdsConfig` is the immutable per-stream RDS identity (PI/PTY/TP/PS/RT).
//! `MpxConfig` adds the DSP-facing knobs (sample rate, injection levels,
//! RDS2 enable). Both derive `serde::{Serialize, Deserialize}` so a caller
//! can persist or transmit them as JSON without the core crate forcing any
//! particular storage on them.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PILOT_LEVEL, DEFAULT_RDS2_LEVEL, DEFAULT_RDS_LEVEL, PS_LEN, RT_LEN,
};
use crate::error::MpxError;

/// Convert a decibel value to a linear voltage-ratio gain.
///
/// Used for the MPX composer's overall gain knob (spec §4.6 step 7)
/// and for the demos package's `--level-mpx`-style controls.
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Clamp a string to the low 8 bits of each character, refusing
/// anything outside Latin-1 the way the design notes recommend.
fn to_latin1_bytes(s: &str) -> Result<Vec<u8>, MpxError> {
    s.chars()
        .map(|c| {
            if (c as u32) <= 0xFF {
                Ok(c as u8)
            } else {
                Err(MpxError::UnsupportedCharacter(c))
            }
        })
        .collect()
}

fn pad_truncate(mut bytes: Vec<u8>, len: usize) -> Vec<u8> {
    bytes.truncate(len);
    while bytes.len() < len {
        bytes.push(b' ');
    }
    bytes
}

/// Immutable per-stream RDS identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdsConfig {
    /// 16-bit Program Identification code.
    pub pi_code: u16,
    /// 5-bit Program Type (0..31).
    pub pty: u8,
    /// Traffic Program flag.
    pub tp: bool,
    /// Program Service name, 1-8 characters; padded/truncated on use.
    pub program_service_name: String,
    /// RadioText, 0-64 characters; padded/truncated on use.
    pub radiotext: String,
}

impl RdsConfig {
    pub fn new(pi_code: u16, program_service_name: impl Into<String>) -> Self {
        Self {
            pi_code,
            pty: 0,
            tp: false,
            program_service_name: program_service_name.into(),
            radiotext: String::new(),
        }
    }

    /// The PS field, Latin-1 encoded, space-padded/truncated to 8 bytes.
    pub fn ps_bytes(&self) -> Result<[u8; PS_LEN], MpxError> {
        let bytes = pad_truncate(to_latin1_bytes(&self.program_service_name)?, PS_LEN);
        Ok(bytes.try_into().expect("padded to PS_LEN"))
    }

    /// The RT field, Latin-1 encoded, space-padded/truncated to 64 bytes.
    pub fn rt_bytes(&self) -> Result<[u8; RT_LEN], MpxError> {
        let bytes = pad_truncate(to_latin1_bytes(&self.radiotext)?, RT_LEN);
        Ok(bytes.try_into().expect("padded to RT_LEN"))
    }
}

/// Per-stream DSP knobs controlling the MPX composer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MpxConfig {
    /// Output/working sample rate in Hz (typically 192000).
    pub sample_rate_hz: f64,
    /// Pilot (19 kHz) injection level, linear voltage ratio.
    pub pilot_level: f32,
    /// RDS (57 kHz) injection level, linear voltage ratio.
    pub rds_level: f32,
    /// Per-carrier RDS2 injection level, linear voltage ratio.
    pub rds2_level: f32,
    /// Whether the experimental RDS2 side-subcarriers are summed in.
    pub rds2_enabled: bool,
    /// Overall linear gain applied after clipping inputs are summed.
    pub overall_gain: f32,
}

impl Default for MpxConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 192_000.0,
            pilot_level: DEFAULT_PILOT_LEVEL,
            rds_level: DEFAULT_RDS_LEVEL,
            rds2_level: DEFAULT_RDS2_LEVEL,
            rds2_enabled: false,
            overall_gain: 1.0,
        }
    }
}

impl MpxConfig {
    /// Samples per RDS symbol at this configuration's sample rate.
    pub fn samples_per_symbol(&self) -> f64 {
        self.sample_rate_hz / crate::constants::RDS_BITRATE
    }

    /// Validate that the sample rate supports the BPSK modulator.
    pub fn validate(&self) -> Result<(), MpxError> {
        let sps = self.samples_per_symbol();
        if sps < crate::constants::MIN_SPS {
            return Err(MpxError::SampleRateTooLow {
                fs: self.sample_rate_hz,
                sps,
            });
        }
        Ok(())
    }
}

/// Combined stream configuration, serializable as a single JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    pub rds: RdsConfig,
    pub mpx: MpxConfig,
}

impl StreamConfig {
    pub fn new(rds: RdsConfig, mpx: MpxConfig) -> Self {
        Self { rds, mpx }
    }

    pub fn from_json_str(s: &str) -> Result<Self, MpxError> {
        serde_json::from_str(s).map_err(|e| MpxError::Other(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, MpxError> {
        serde_json::to_string_pretty(self).map_err(|e| MpxError::Other(e.to_string()))
    }
}
