//! Composite baseband (MPX) assembly: audio band-limiting, L+R/L-R
//! formation, 19 kHz pilot, 38 kHz DSB-SC stereo subcarrier, and RDS/
//! RDS2 subcarrier summation.

use std::f64::consts::PI;

use crate::config::MpxConfig;
use crate::constants::{
    BIT_REQUEST_HEADROOM, MPX_CLIP, PILOT_HZ, RDS0_HZ, RDS2_SUBCARRIER_HZ, RDS_BITRATE,
    STEREO_SUBCARRIER_HZ,
};
use crate::dsp::filters::audio_lowpass_taps;
use crate::dsp::modulator::BpskModulator;
use crate::error::MpxError;
use crate::rds::bitstream::BitstreamGenerator;

/// Fallback top-up size if the headroom-padded request still falls
/// short (e.g. a samples-per-symbol rounding edge case).
const RDS_BIT_TOPUP: usize = 16;

fn convolve(taps: &[f64], history: &mut Vec<f32>, input: &[f32]) -> Vec<f32> {
    let taps_len = taps.len();
    let mut extended = history.clone();
    extended.extend_from_slice(input);

    let out_len = input.len();
    let mut filtered = Vec::with_capacity(out_len);
    for n in 0..out_len {
        let mut acc = 0.0f64;
        for (k, &h) in taps.iter().enumerate() {
            let idx = n + taps_len - 1 - k;
            acc += h * extended[idx] as f64;
        }
        filtered.push(acc as f32);
    }

    if taps_len > 1 {
        let keep_from = extended.len() - (taps_len - 1);
        *history = extended[keep_from..].to_vec();
    }
    filtered
}

pub struct MpxComposer {
    mpx: MpxConfig,
    lpf_taps: Vec<f64>,
    hist_l: Vec<f32>,
    hist_r: Vec<f32>,
    carrier_index: u64,

    rds0: BpskModulator,
    rds2: Option<Vec<BpskModulator>>,

    rds0_pending: Vec<f32>,
    rds2_pending: Vec<Vec<f32>>,
}

impl MpxComposer {
    pub fn new(mpx: MpxConfig) -> Result<Self, MpxError> {
        mpx.validate()?;
        let lpf_taps = audio_lowpass_taps(mpx.sample_rate_hz);
        let hist_len = lpf_taps.len().saturating_sub(1);

        let rds0 = BpskModulator::new(mpx.sample_rate_hz, RDS0_HZ)?;
        let rds2 = if mpx.rds2_enabled {
            let mods: Result<Vec<_>, _> = RDS2_SUBCARRIER_HZ
                .iter()
                .map(|&f| BpskModulator::new(mpx.sample_rate_hz, f))
                .collect();
            Some(mods?)
        } else {
            None
        };
        let rds2_pending = vec![Vec::new(); RDS2_SUBCARRIER_HZ.len()];

        Ok(Self {
            mpx,
            lpf_taps,
            hist_l: vec![0.0; hist_len],
            hist_r: vec![0.0; hist_len],
            carrier_index: 0,
            rds0,
            rds2,
            rds0_pending: Vec::new(),
            rds2_pending,
        })
    }

    fn modulate_chunk(&mut self, chunk: &[bool]) {
        self.rds0_pending.extend(self.rds0.modulate(chunk));
        if let Some(mods) = &mut self.rds2 {
            for (pending, modulator) in self.rds2_pending.iter_mut().zip(mods.iter_mut()) {
                pending.extend(modulator.modulate(chunk));
            }
        }
    }

    fn ensure_rds_samples(&mut self, bits: &mut BitstreamGenerator, need: usize) {
        if self.rds0_pending.len() >= need {
            return;
        }
        let missing = need - self.rds0_pending.len();
        let bits_needed =
            ((missing as f64 / self.mpx.sample_rate_hz * RDS_BITRATE).ceil() as usize) + BIT_REQUEST_HEADROOM;
        let chunk = bits.generate(bits_needed);
        self.modulate_chunk(&chunk);

        // The headroom should always be generous enough; this loop only
        // guards against a pathological samples-per-symbol rounding edge.
        while self.rds0_pending.len() < need {
            let extra = bits.generate(RDS_BIT_TOPUP);
            self.modulate_chunk(&extra);
        }
    }

    /// Compose one block of MPX samples from stereo audio input and an
    /// RDS bit source. `left`/`right` must be equal length; the output
    /// has the same length.
    pub fn compose(&mut self, left: &[f32], right: &[f32], bits: &mut BitstreamGenerator) -> Vec<f32> {
        debug_assert_eq!(left.len(), right.len());
        let n = left.len();
        self.ensure_rds_samples(bits, n);

        let filtered_l = convolve(&self.lpf_taps, &mut self.hist_l, left);
        let filtered_r = convolve(&self.lpf_taps, &mut self.hist_r, right);

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let t = (self.carrier_index + i as u64) as f64 / self.mpx.sample_rate_hz;
            let sum = (filtered_l[i] + filtered_r[i]) * 0.5;
            let diff = filtered_l[i] - filtered_r[i];

            let pilot = self.mpx.pilot_level * (2.0 * PI * PILOT_HZ * t).cos() as f32;
            let stereo = diff * (2.0 * PI * STEREO_SUBCARRIER_HZ * t).cos() as f32;
            let rds0 = self.mpx.rds_level * self.rds0_pending[i];

            let mut sample = sum + pilot + stereo + rds0;
            if self.rds2.is_some() {
                for pending in &self.rds2_pending {
                    sample += self.mpx.rds2_level * pending[i];
                }
            }

            sample *= self.mpx.overall_gain;
            out.push(sample.clamp(-MPX_CLIP, MPX_CLIP));
        }

        self.carrier_index += n as u64;
        self.rds0_pending.drain(0..n);
        for pending in &mut self.rds2_pending {
            pending.drain(0..n);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RdsConfig;

    fn composer(mpx: MpxConfig) -> (MpxComposer, BitstreamGenerator) {
        let composer = MpxComposer::new(mpx).unwrap();
        let bits = BitstreamGenerator::new(RdsConfig::new(0x1234, "TESTFM")).unwrap();
        (composer, bits)
    }

    #[test]
    fn output_is_always_within_clip_bounds() {
        let mpx = MpxConfig {
            sample_rate_hz: 192_000.0,
            overall_gain: 10.0, // deliberately excessive to exercise clipping
            ..MpxConfig::default()
        };
        let (mut c, mut bits) = composer(mpx);

        let left: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.01).sin()).collect();
        let right: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.013).cos()).collect();
        let out = c.compose(&left, &right, &mut bits);

        assert_eq!(out.len(), left.len());
        for s in out {
            assert!(s.abs() <= MPX_CLIP);
        }
    }

    #[test]
    fn zero_rds_level_removes_rds_contribution() {
        let mpx = MpxConfig {
            sample_rate_hz: 192_000.0,
            rds_level: 0.0,
            pilot_level: 0.0,
            ..MpxConfig::default()
        };
        let (mut c, mut bits) = composer(mpx);

        let silence = vec![0.0f32; 2048];
        let out = c.compose(&silence, &silence, &mut bits);
        // With silent audio, zero pilot, and zero RDS level the bus
        // carries nothing but the (also silent) stereo subcarrier.
        for s in out {
            assert!(s.abs() < 1e-6);
        }
    }

    #[test]
    fn zero_injections_with_mono_audio_reduce_to_the_lowpassed_lpr_term() {
        // Invariant #7: with pilot/RDS/RDS2 injection and gain at unity
        // and mono-sourced audio (L == R, so the L-R stereo subcarrier
        // carries nothing), MPX output must equal lpr = (L+R)/2 run
        // through the same audio low-pass path.
        let mpx = MpxConfig {
            sample_rate_hz: 192_000.0,
            pilot_level: 0.0,
            rds_level: 0.0,
            rds2_level: 0.0,
            overall_gain: 1.0,
            ..MpxConfig::default()
        };
        let (mut c, mut bits) = composer(mpx);

        let audio: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.02).sin()).collect();

        let mut hist_l = vec![0.0; c.lpf_taps.len().saturating_sub(1)];
        let filtered = convolve(&c.lpf_taps, &mut hist_l, &audio);
        let expected: Vec<f32> = filtered.iter().map(|&s| s.clamp(-MPX_CLIP, MPX_CLIP)).collect();

        let out = c.compose(&audio, &audio, &mut bits);
        assert_eq!(out.len(), expected.len());
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-5, "got {a}, expected {b}");
        }
    }

    #[test]
    fn s6_pilot_amplitude_matches_configured_level() {
        let mpx = MpxConfig {
            sample_rate_hz: 192_000.0,
            pilot_level: 0.08,
            rds_level: 0.0,
            ..MpxConfig::default()
        };
        let (mut c, mut bits) = composer(mpx);
        let silence = vec![0.0f32; 8192];
        let out = c.compose(&silence, &silence, &mut bits);
        let peak = out.iter().cloned().fold(0.0f32, |a, b| a.max(b.abs()));
        assert!((peak - 0.08).abs() < 0.01);
    }

    #[test]
    fn composing_across_blocks_keeps_rds_bus_continuous() {
        let mpx = MpxConfig::default();
        let (mut whole, mut bits_a) = composer(mpx);
        let (mut split, mut bits_b) = composer(mpx);

        let left = vec![0.0f32; 4000];
        let right = vec![0.0f32; 4000];

        let whole_out = whole.compose(&left, &right, &mut bits_a);

        let mut split_out = split.compose(&left[..2000], &right[..2000], &mut bits_b);
        split_out.extend(split.compose(&left[2000..], &right[2000..], &mut bits_b));

        assert_eq!(whole_out.len(), split_out.len());
        for (a, b) in whole_out.iter().zip(split_out.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }
}
