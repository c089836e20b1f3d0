//! RDS group assembly: groups 0A (Program Service) and 2A (RadioText).
//!
//! Block B's bit layout here places PTY in the high bits and the
//! group-type nibble below it, which departs from the canonical RDS
//! position — this is the core's normative layout (see the design
//! notes on known source deviations), not a canonical ETSI encoder.

use crate::config::RdsConfig;
use crate::constants::{OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D, PS_LEN, RT_LEN};
use crate::error::MpxError;
use crate::rds::crc::block_checkword;
use crate::util::bitwriter::BitWriter;

/// Pack one 26-bit block: 16 data bits then the offset-adjusted
/// 10-bit checkword, both MSB-first.
pub fn pack_block(data: u16, offset: u16) -> Vec<bool> {
    let cw = block_checkword(data, offset);
    let mut w = BitWriter::with_capacity(26);
    w.push_bits(data as u32, 16);
    w.push_bits(cw as u32, 10);
    w.into_bits()
}

/// Build group 0A from already-validated PS bytes, without touching
/// `RdsConfig` (used by [`crate::rds::bitstream::BitstreamGenerator`]
/// once the config's characters have been validated at construction).
pub fn build_group_0a_raw(pi_code: u16, tp: bool, pty: u8, ps: &[u8; PS_LEN], ps_index: u8) -> Vec<bool> {
    let s = (ps_index as u32) & 0x3;
    // B = (tp<<10) | (pty<<5) | (group_type<<1) | version_a | segment;
    // group_type and version_a are always 0 for 0A.
    let block_b = ((tp as u32) << 10) | ((pty as u32 & 0x1F) << 5) | s;

    let idx = (ps_index as usize & 0x3) * 2;
    let block_d = ((ps[idx] as u32) << 8) | ps[idx + 1] as u32;

    let mut bits = Vec::with_capacity(104);
    bits.extend(pack_block(pi_code, OFFSET_A));
    bits.extend(pack_block(block_b as u16, OFFSET_B));
    bits.extend(pack_block(0x0000, OFFSET_C));
    bits.extend(pack_block(block_d as u16, OFFSET_D));
    bits
}

/// Build group 2A from already-validated RT bytes.
pub fn build_group_2a_raw(pi_code: u16, tp: bool, pty: u8, rt: &[u8; RT_LEN], rt_index: u8) -> Vec<bool> {
    let p = (rt_index as u32) & 0xF;
    // group_type = 2, shifted into the same position as 0A's group-type nibble.
    let block_b = ((tp as u32) << 10) | ((pty as u32 & 0x1F) << 5) | (2u32 << 1) | p;

    let idx = (rt_index as usize & 0xF) * 4;
    let block_c = ((rt[idx] as u32) << 8) | rt[idx + 1] as u32;
    let block_d = ((rt[idx + 2] as u32) << 8) | rt[idx + 3] as u32;

    let mut bits = Vec::with_capacity(104);
    bits.extend(pack_block(pi_code, OFFSET_A));
    bits.extend(pack_block(block_b as u16, OFFSET_B));
    bits.extend(pack_block(block_c as u16, OFFSET_C));
    bits.extend(pack_block(block_d as u16, OFFSET_D));
    bits
}

/// Build group 0A directly from a config, validating PS characters.
pub fn build_group_0a(cfg: &RdsConfig, ps_index: u8) -> Result<Vec<bool>, MpxError> {
    let ps = cfg.ps_bytes()?;
    Ok(build_group_0a_raw(cfg.pi_code, cfg.tp, cfg.pty, &ps, ps_index))
}

/// Build group 2A directly from a config, validating RT characters.
pub fn build_group_2a(cfg: &RdsConfig, rt_index: u8) -> Result<Vec<bool>, MpxError> {
    let rt = cfg.rt_bytes()?;
    Ok(build_group_2a_raw(cfg.pi_code, cfg.tp, cfg.pty, &rt, rt_index))
}
