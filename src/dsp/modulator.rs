//! Differentially-encoded BPSK modulator for one RDS (or RDS2) subcarrier.
//!
//! Each instance owns persistent state — the differential-encoding
//! memory, the raised-cosine filter's history, and the carrier sample
//! counter — so that a caller can feed it bits in arbitrarily sized
//! blocks and get a phase-continuous subcarrier out.

use std::f64::consts::PI;

use crate::constants::{MIN_SPS, RDS_BITRATE};
use crate::dsp::filters::raised_cosine_taps;
use crate::error::MpxError;

#[derive(Debug, Clone)]
pub struct BpskModulator {
    fs: f64,
    subcarrier_hz: f64,
    sps: f64,
    taps: Vec<f64>,

    /// Trailing `taps.len() - 1` filtered-input samples carried across calls.
    fir_history: Vec<f32>,
    /// Global sample counter, used to keep the carrier phase continuous.
    sample_index: u64,
    /// Differential-encoding memory; starts at +1.0 and flips on a 1 bit.
    last_symbol: f32,
    /// Fractional remainder of symbol-boundary placement, for
    /// non-integral samples-per-symbol.
    frac_accum: f64,
}

impl BpskModulator {
    pub fn new(fs: f64, subcarrier_hz: f64) -> Result<Self, MpxError> {
        let sps = fs / RDS_BITRATE;
        if sps < MIN_SPS {
            return Err(MpxError::SampleRateTooLow { fs, sps });
        }
        let taps = raised_cosine_taps(sps);
        let history_len = taps.len().saturating_sub(1);
        Ok(Self {
            fs,
            subcarrier_hz,
            sps,
            taps,
            fir_history: vec![0.0; history_len],
            sample_index: 0,
            last_symbol: 1.0,
            frac_accum: 0.0,
        })
    }

    pub fn samples_per_symbol(&self) -> f64 {
        self.sps
    }

    /// Differentially encode `bits` into a raised-cosine-shaped impulse
    /// train and mix it onto the subcarrier, returning one `f32` sample
    /// per output sample at `fs`.
    pub fn modulate(&mut self, bits: &[bool]) -> Vec<f32> {
        let impulses = self.symbol_impulse_train(bits);
        let filtered = self.shape(&impulses);
        self.mix_onto_carrier(&filtered)
    }

    fn symbol_impulse_train(&mut self, bits: &[bool]) -> Vec<f32> {
        let mut impulses = Vec::new();
        for &bit in bits {
            if bit {
                self.last_symbol = -self.last_symbol;
            }
            self.frac_accum += self.sps;
            let count = self.frac_accum.floor() as usize;
            self.frac_accum -= count as f64;
            if count == 0 {
                continue;
            }
            impulses.push(self.last_symbol);
            impulses.resize(impulses.len() + count - 1, 0.0);
        }
        impulses
    }

    fn shape(&mut self, impulses: &[f32]) -> Vec<f32> {
        let taps_len = self.taps.len();
        let mut extended = self.fir_history.clone();
        extended.extend_from_slice(impulses);

        let out_len = impulses.len();
        let mut filtered = Vec::with_capacity(out_len);
        for n in 0..out_len {
            let mut acc = 0.0f64;
            for (k, &h) in self.taps.iter().enumerate() {
                let idx = n + taps_len - 1 - k;
                acc += h * extended[idx] as f64;
            }
            filtered.push(acc as f32);
        }

        if taps_len > 1 {
            let keep_from = extended.len() - (taps_len - 1);
            self.fir_history = extended[keep_from..].to_vec();
        }
        filtered
    }

    fn mix_onto_carrier(&mut self, filtered: &[f32]) -> Vec<f32> {
        let out: Vec<f32> = filtered
            .iter()
            .enumerate()
            .map(|(n, &s)| {
                let t = (self.sample_index + n as u64) as f64 / self.fs;
                let carrier = (2.0 * PI * self.subcarrier_hz * t).cos();
                (s as f64 * carrier) as f32
            })
            .collect();
        self.sample_index += filtered.len() as u64;
        out
    }
}
