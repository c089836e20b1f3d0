//! Stateful generator that interleaves PS groups, RT groups, and an
//! opportunistic logo payload into one continuous RDS bit sequence.
//!
//! ## Scheduling
//!
//! A naive port of the distilled scheduling rule — deciding the next
//! group's type from `ps_index % 3` — gets stuck replaying 2A forever
//! once `ps_index` lands on a residue that only `2A` branches advance
//! away from, since `ps_index` itself only advances on `0A` emissions.
//! This generator instead keeps an internal tick counter (`call_count`)
//! that advances on every call regardless of branch, and uses that
//! counter for the branch decision; `ps_index`/`rt_index` remain
//! dedicated purely to segment selection within PS/RT. This keeps the
//! 2-out-of-3 PS/RT ratio without the livelock.
//!
//! ## Resumability
//!
//! [`BitstreamGenerator::generate`] must produce identical output
//! whether called once for `n` bits or split across several calls
//! summing to `n`. Simply discarding a partially-consumed group's
//! leftover bits on every call breaks that property for splits that
//! land mid-group, so the generator retains any unconsumed tail
//! internally and serves it first on the next call.

use crate::config::RdsConfig;
use crate::constants::{PS_LEN, RT_LEN, RDS_GROUP_BITS};
use crate::error::MpxError;
use crate::rds::group::{build_group_0a_raw, build_group_2a_raw};
use crate::util::logging::debug::log_group_type_detection;

/// How often (in generator ticks) the logo chunk is offered a turn,
/// when a logo frame is loaded.
const LOGO_TICK_PERIOD: u64 = 5;

#[derive(Debug, Clone)]
pub struct BitstreamGenerator {
    pi_code: u16,
    tp: bool,
    pty: u8,
    ps: [u8; PS_LEN],
    rt: [u8; RT_LEN],

    call_count: u64,
    ps_index: u8,
    rt_index: u8,

    logo_frame: Option<Vec<bool>>,
    logo_cursor: usize,

    /// Bits produced by the last group/chunk build but not yet
    /// returned to a caller of [`generate`](Self::generate).
    pending: Vec<bool>,
}

impl BitstreamGenerator {
    /// Validate the config's PS/RT text once and cache its bytes.
    pub fn new(rds: RdsConfig) -> Result<Self, MpxError> {
        let ps = rds.ps_bytes()?;
        let rt = rds.rt_bytes()?;
        Ok(Self {
            pi_code: rds.pi_code,
            tp: rds.tp,
            pty: rds.pty,
            ps,
            rt,
            call_count: 0,
            ps_index: 0,
            rt_index: 0,
            logo_frame: None,
            logo_cursor: 0,
            pending: Vec::new(),
        })
    }

    /// Load (or clear, with an empty slice) an encoded logo frame to
    /// interleave opportunistically into the stream.
    pub fn set_logo_bits(&mut self, bits: Vec<bool>) {
        self.logo_cursor = 0;
        self.logo_frame = if bits.is_empty() { None } else { Some(bits) };
    }

    fn next_logo_chunk(&mut self) -> Option<Vec<bool>> {
        let frame = self.logo_frame.as_ref()?;
        let len = frame.len();
        if len == 0 {
            return None;
        }
        let mut remaining = len - self.logo_cursor;
        if remaining == 0 {
            self.logo_cursor = 0;
            remaining = len;
        }
        let take = remaining.min(RDS_GROUP_BITS as usize);
        let frame = self.logo_frame.as_ref().unwrap();
        let chunk = frame[self.logo_cursor..self.logo_cursor + take].to_vec();
        self.logo_cursor += take;
        if self.logo_cursor >= len {
            self.logo_cursor = 0;
        }
        Some(chunk)
    }

    /// Produce the next scheduled group (or logo chunk) as a flat bit vector.
    pub fn next_group(&mut self) -> Vec<bool> {
        let tick = self.call_count;
        self.call_count = self.call_count.wrapping_add(1);

        if self.logo_frame.is_some() && tick % LOGO_TICK_PERIOD == 0 {
            if let Some(chunk) = self.next_logo_chunk() {
                return chunk;
            }
        }

        if tick % 3 == 2 {
            log_group_type_detection(self.pi_code, "2A");
            let bits = build_group_2a_raw(self.pi_code, self.tp, self.pty, &self.rt, self.rt_index);
            self.rt_index = (self.rt_index + 1) % 16;
            bits
        } else {
            log_group_type_detection(self.pi_code, "0A");
            let bits = build_group_0a_raw(self.pi_code, self.tp, self.pty, &self.ps, self.ps_index);
            self.ps_index = (self.ps_index + 1) % 4;
            bits
        }
    }

    /// Produce exactly `n` bits, carrying any unconsumed group tail
    /// across calls so that `generate(a)` followed by `generate(b)`
    /// always equals a single `generate(a + b)`.
    pub fn generate(&mut self, n: usize) -> Vec<bool> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            if self.pending.is_empty() {
                self.pending = self.next_group();
            }
            let need = n - out.len();
            if need >= self.pending.len() {
                out.extend(self.pending.drain(..));
            } else {
                out.extend(self.pending.drain(..need));
            }
        }
        out
    }
}
